pub mod fk;
pub mod ik;
