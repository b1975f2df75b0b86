//! Initial database migration.
//!
//! Creates the enums, tables, indexes, and the updated_at trigger.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(LOTS_SQL).await?;
        db.execute_unprepared(PRODUCTS_SQL).await?;
        db.execute_unprepared(PAYMENTS_SQL).await?;
        db.execute_unprepared(SALES_SQL).await?;
        db.execute_unprepared(EXPENSES_SQL).await?;
        db.execute_unprepared(SHIPPING_INFO_SQL).await?;
        db.execute_unprepared(TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE lot_payment_status AS ENUM (
    'payment_pending',
    'partially_paid',
    'paid'
);

CREATE TYPE shipping_status AS ENUM (
    'shipping_pending',
    'shipping_placed',
    'shipped'
);

CREATE TYPE expense_type AS ENUM (
    'servicing',
    'refund',
    'shipping',
    'misc'
);
";

const LOTS_SQL: &str = r"
CREATE TABLE lots (
    id BIGSERIAL PRIMARY KEY,
    title VARCHAR(255) NOT NULL,
    total_price NUMERIC(10, 2) NOT NULL,
    bought_on DATE NOT NULL,
    bought_from VARCHAR(255),
    paid_on DATE,
    status lot_payment_status NOT NULL DEFAULT 'payment_pending',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_lot_total_price_positive CHECK (total_price > 0)
);

CREATE INDEX idx_lots_bought_on ON lots(bought_on DESC);
";

const PRODUCTS_SQL: &str = r"
CREATE TABLE products (
    id BIGSERIAL PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    specs TEXT,
    price NUMERIC(10, 2) NOT NULL,
    stock INTEGER NOT NULL DEFAULT 0,
    available_quantity INTEGER NOT NULL DEFAULT 0,
    category VARCHAR(50),
    sub_category VARCHAR(50),
    cosmetic_condition VARCHAR(50),
    working_condition VARCHAR(50),
    bought_from VARCHAR(255),
    bought_at TIMESTAMP,
    lot_id BIGINT REFERENCES lots(id) ON DELETE SET NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_product_price_positive CHECK (price > 0),
    CONSTRAINT chk_product_stock_non_negative CHECK (stock >= 0),
    CONSTRAINT chk_product_availability_non_negative CHECK (available_quantity >= 0)
);

CREATE INDEX idx_products_lot ON products(lot_id);
CREATE INDEX idx_products_available ON products(available_quantity) WHERE available_quantity > 0;
CREATE INDEX idx_products_bought_at ON products(bought_at);
";

const PAYMENTS_SQL: &str = r"
CREATE TABLE payments (
    id BIGSERIAL PRIMARY KEY,
    lot_id BIGINT NOT NULL REFERENCES lots(id) ON DELETE CASCADE,
    amount NUMERIC(10, 2) NOT NULL,
    payment_date DATE NOT NULL,
    payment_method VARCHAR(100),
    notes TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_payment_amount_positive CHECK (amount > 0)
);

CREATE INDEX idx_payments_lot ON payments(lot_id);
";

const SALES_SQL: &str = r"
CREATE TABLE sales (
    id BIGSERIAL PRIMARY KEY,
    product_id BIGINT NOT NULL REFERENCES products(id) ON DELETE RESTRICT,
    quantity_sold INTEGER NOT NULL,
    sale_price NUMERIC(10, 2) NOT NULL,
    unit_cost_at_sale NUMERIC(10, 2) NOT NULL,
    customer VARCHAR(255),
    sale_date TIMESTAMP NOT NULL,
    shipping_status shipping_status NOT NULL DEFAULT 'shipping_pending',
    is_refunded BOOLEAN NOT NULL DEFAULT FALSE,
    refunded_at TIMESTAMP,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_sale_quantity_positive CHECK (quantity_sold > 0),
    CONSTRAINT chk_sale_price_positive CHECK (sale_price > 0)
);

CREATE INDEX idx_sales_product ON sales(product_id);
CREATE INDEX idx_sales_date ON sales(sale_date);
CREATE INDEX idx_sales_unshipped ON sales(sale_date) WHERE shipping_status = 'shipping_pending';
";

const EXPENSES_SQL: &str = r"
CREATE TABLE expenses (
    id BIGSERIAL PRIMARY KEY,
    expense_type expense_type NOT NULL,
    amount NUMERIC(10, 2) NOT NULL,
    description TEXT,
    vendor VARCHAR(255),
    date DATE NOT NULL,
    sale_id BIGINT REFERENCES sales(id) ON DELETE SET NULL,
    product_id BIGINT REFERENCES products(id) ON DELETE SET NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_expense_amount_positive CHECK (amount > 0)
);

CREATE INDEX idx_expenses_date ON expenses(date);
CREATE INDEX idx_expenses_type ON expenses(expense_type);
CREATE INDEX idx_expenses_sale ON expenses(sale_id);
";

const SHIPPING_INFO_SQL: &str = r"
CREATE TABLE shipping_info (
    id BIGSERIAL PRIMARY KEY,
    sale_id BIGINT NOT NULL REFERENCES sales(id) ON DELETE CASCADE,
    customer_name VARCHAR(255) NOT NULL,
    customer_email VARCHAR(255) NOT NULL,
    customer_phone VARCHAR(50) NOT NULL,
    customer_address TEXT NOT NULL,
    customer_pincode VARCHAR(20) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_shipping_info_sale UNIQUE (sale_id)
);
";

const TRIGGERS_SQL: &str = r"
-- ============================================================
-- FUNCTION: set_updated_at
-- Keeps updated_at current on every row update
-- ============================================================
CREATE OR REPLACE FUNCTION set_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = now();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_lots_updated_at
BEFORE UPDATE ON lots
FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_products_updated_at
BEFORE UPDATE ON products
FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_payments_updated_at
BEFORE UPDATE ON payments
FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_sales_updated_at
BEFORE UPDATE ON sales
FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_expenses_updated_at
BEFORE UPDATE ON expenses
FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_shipping_info_updated_at
BEFORE UPDATE ON shipping_info
FOR EACH ROW EXECUTE FUNCTION set_updated_at();
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS shipping_info CASCADE;
DROP TABLE IF EXISTS expenses CASCADE;
DROP TABLE IF EXISTS sales CASCADE;
DROP TABLE IF EXISTS payments CASCADE;
DROP TABLE IF EXISTS products CASCADE;
DROP TABLE IF EXISTS lots CASCADE;
DROP FUNCTION IF EXISTS set_updated_at;
DROP TYPE IF EXISTS expense_type;
DROP TYPE IF EXISTS shipping_status;
DROP TYPE IF EXISTS lot_payment_status;
";
