pub mod arithmetic;
pub mod uart;
