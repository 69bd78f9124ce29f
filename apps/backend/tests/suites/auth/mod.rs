pub mod gate_props;
pub mod login;
pub mod register;
