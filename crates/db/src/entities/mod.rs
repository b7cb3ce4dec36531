//! `SeaORM` entity definitions.
//!
//! Ownership runs organization → season → team, with budgets, expenses,
//! revenues and players hanging off seasons and teams. Foreign keys cascade
//! from parent to child.

#![allow(missing_docs)]

pub mod budgets;
pub mod expenses;
pub mod organizations;
pub mod players;
pub mod revenues;
pub mod sea_orm_active_enums;
pub mod seasons;
pub mod teams;
pub mod users;
