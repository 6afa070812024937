pub mod applier;
