#![no_std]

pub mod committee;
pub mod errors;
pub mod records;
pub mod rent;
pub mod settings;
pub mod settlement;
pub mod stake_history;
