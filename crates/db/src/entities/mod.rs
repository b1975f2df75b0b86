//! `SeaORM` entity definitions.

pub mod expenses;
pub mod lots;
pub mod payments;
pub mod products;
pub mod sales;
pub mod sea_orm_active_enums;
pub mod shipping_info;
