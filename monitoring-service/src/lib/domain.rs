pub mod alert;
pub mod sensor;
