pub mod consts;
pub mod helper;
