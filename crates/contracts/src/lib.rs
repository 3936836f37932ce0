//! Контракты системы складского учёта: агрегаты, DTO и чистая логика
//! процесса приёмки межскладских перемещений.

pub mod domain;
pub mod enums;
pub mod usecases;
