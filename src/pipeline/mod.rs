// Pipeline orchestration: one report run over both tables.

pub mod report;
