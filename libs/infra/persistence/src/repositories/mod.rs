// [libs/infra/persistence/src/repositories/mod.rs]
pub mod cash;
pub mod regional;
pub mod terminal;
