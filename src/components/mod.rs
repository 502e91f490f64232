pub mod controls;
pub mod logs;
pub mod stage;
pub mod status;

pub use controls::ShotControls;
pub use logs::ActivityLog;
pub use stage::Stage;
pub use status::ModuleStatus;
