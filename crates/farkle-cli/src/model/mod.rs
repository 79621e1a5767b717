pub(crate) mod odds_table;
pub(crate) mod simulation_report;
