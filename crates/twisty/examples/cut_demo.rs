//! Cut the sphere into quarters, lock the equator, and turn the north half.
//!
//! Usage:
//!   cargo run -p twisty --example cut_demo
//!
//! Prints element areas, the equator lock's passwords, and whether the
//! circle through the north meridian arc closes into a lock after each
//! quarter turn.

use nalgebra::Vector3;
use twisty::prelude::*;

fn main() -> Result<(), KernelError> {
    let equator = SphCircle::great(Vector3::z());
    let meridian = SphCircle::great(Vector3::x());
    let mut s = Sphere::default();
    let w = s.whole_sphere();
    let (north, south) = s.slice(w, &equator)?;
    for e in north.into_iter().chain(south) {
        s.slice(e, &meridian)?;
    }
    for e in s.element_ids() {
        println!("element {:>2}: area {:.4}", e.0, s.area(e)?);
    }

    let tol = s.tolerance();
    let seed = s
        .arc_ids()
        .into_iter()
        .find(|&a| s.arc(a).is_ok_and(|arc| arc.circle().same_as(&equator, tol)));
    let Some(l) = seed.map(|a| s.build_lock(a)).transpose()?.flatten() else {
        eprintln!("equator does not form a lock");
        return Ok(());
    };
    println!("passwords: {:?}", s.lock(l)?.passwords());

    let probe = s
        .arc_ids()
        .into_iter()
        .find(|&a| s.arc(a).is_ok_and(|arc| arc.circle().same_as(&meridian, tol)));
    for turn in 1..=4 {
        s.twist(l, 1.0, LockSide::Left)?;
        s.validate()?;
        let lockable = match probe {
            Some(a) => s.build_lock(a)?.is_some(),
            None => false,
        };
        println!(
            "after {turn} quarter turn(s): offset {:.1}, meridian arc lockable: {lockable}",
            s.lock(l)?.offset()
        );
    }
    Ok(())
}
