use std::fmt;
use std::rc::Rc;

use crate::error::ExportError;

/// Functions the simulator build is expected to export.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Export {
    EntryPoint,
    SetBallAngle,
    ShootBall,
}

impl Export {
    pub const ALL: [Export; 3] = [Export::EntryPoint, Export::SetBallAngle, Export::ShootBall];

    pub fn symbol(self) -> &'static str {
        match self {
            Export::EntryPoint => "_main",
            Export::SetBallAngle => "_setBallAngle",
            Export::ShootBall => "_shootBall",
        }
    }

    pub fn arity(self) -> usize {
        match self {
            Export::SetBallAngle => 3,
            Export::EntryPoint | Export::ShootBall => 0,
        }
    }
}

impl fmt::Display for Export {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// An initialized simulator instance.
pub trait SimulationModule {
    fn invoke(&self, export: Export, args: &[f64]) -> Result<(), ExportError>;
}

/// Shared reference to the initialized module. Equality is identity.
#[derive(Clone)]
pub struct ModuleHandle(Rc<dyn SimulationModule>);

impl ModuleHandle {
    pub fn new(module: impl SimulationModule + 'static) -> Self {
        Self(Rc::new(module))
    }

    pub fn invoke(&self, export: Export, args: &[f64]) -> Result<(), ExportError> {
        debug_assert_eq!(args.len(), export.arity(), "wrong argument count for {export}");
        self.0.invoke(export, args)
    }

    pub fn run_entry_point(&self) -> Result<(), ExportError> {
        self.invoke(Export::EntryPoint, &[])
    }

    pub fn set_ball_angle(&self, angle: f64, elevation: f64, speed: f64) -> Result<(), ExportError> {
        self.invoke(Export::SetBallAngle, &[angle, elevation, speed])
    }

    pub fn shoot_ball(&self) -> Result<(), ExportError> {
        self.invoke(Export::ShootBall, &[])
    }
}

impl PartialEq for ModuleHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ModuleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleHandle")
            .field("refs", &Rc::strong_count(&self.0))
            .finish()
    }
}
