pub mod collidables;
pub mod rigid_pose;

pub use rigid_pose::RigidPose;
