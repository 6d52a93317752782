use crate::Vector3D;
use super::{UnitCell, SimpleSystem};

pub fn test_system(name: &str) -> SimpleSystem {
    match name {
        "methane" => get_methane(),
        "water" => get_water(),
        "CH" => get_ch(),
        "CsCl" => get_cscl(),
        _ => panic!("unknown test system {}", name),
    }
}

fn get_methane() -> SimpleSystem {
    let mut system = SimpleSystem::new(UnitCell::cubic(5.0));
    system.add_atom(Vector3D::new(5.0000, 5.0000, 5.0000));
    system.add_atom(Vector3D::new(5.5288, 5.1610, 5.9359));
    system.add_atom(Vector3D::new(5.2051, 5.8240, 4.3214));
    system.add_atom(Vector3D::new(5.3345, 4.0686, 4.5504));
    system.add_atom(Vector3D::new(3.9315, 4.9463, 5.1921));
    return system;
}

fn get_water() -> SimpleSystem {
    let mut system = SimpleSystem::new(UnitCell::cubic(10.0));
    system.add_atom(Vector3D::new(0.0, 0.0, 0.0));
    system.add_atom(Vector3D::new(0.0, 0.75545, -0.58895));
    system.add_atom(Vector3D::new(0.0, -0.75545, -0.58895));
    return system;
}

fn get_ch() -> SimpleSystem {
    let mut system = SimpleSystem::new(UnitCell::cubic(10.0));
    system.add_atom(Vector3D::new(0.0, 0.0, 0.0));
    system.add_atom(Vector3D::new(0.0, 1.2, 0.0));
    return system;
}

/// CsCl structure: the primitive unit cell is the usual cubic cell with side
/// length set to one, making the minimum image distances easy to check by
/// hand.
fn get_cscl() -> SimpleSystem {
    let mut system = SimpleSystem::new(UnitCell::cubic(1.0));
    system.add_atom(Vector3D::new(0.0, 0.0, 0.0));
    system.add_atom(Vector3D::new(0.5, 0.5, 0.5));
    return system;
}
