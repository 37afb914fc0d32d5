//! Testing utilities and harness for panelkit drawers

pub mod drivers;
pub mod robot;
pub mod robot_assertions;

pub use drivers::{DriverRequest, ImmediateDriver, ManualDriver};
pub use robot::DrawerRobot;

pub mod prelude {
    pub use crate::drivers::{DriverRequest, ImmediateDriver, ManualDriver};
    pub use crate::robot::DrawerRobot;
    pub use crate::robot_assertions;
}
