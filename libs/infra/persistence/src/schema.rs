// [libs/infra/persistence/src/schema.rs]
/*!
 * APARATO: SCHEMA DDL (ESTRATO L3)
 * RESPONSABILIDAD: SENTENCIAS IDEMPOTENTES DE CREACION DE TABLA E INDICE
 *
 * Cada metodo de escritura ejecuta su bloque de DDL al entrar (CREATE TABLE
 * IF NOT EXISTS + CREATE INDEX IF NOT EXISTS); no hay migraciones separadas.
 */

pub const REGIONAL_DATA_DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS regional_data (
        id SERIAL PRIMARY KEY,
        unique_request_id UUID NOT NULL,
        region_code VARCHAR(10) NOT NULL,
        retrieval_timestamp TIMESTAMPTZ NOT NULL,
        raw_regional_data JSONB NOT NULL,
        count_available INT NOT NULL,
        count_warning INT NOT NULL,
        count_zombie INT NOT NULL,
        count_wounded INT NOT NULL,
        count_out_of_service INT NOT NULL,
        total_atms_in_region INT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_regional_data_region_retrieval ON regional_data (region_code, retrieval_timestamp DESC)",
    "CREATE INDEX IF NOT EXISTS idx_regional_data_raw_gin ON regional_data USING GIN (raw_regional_data)",
];

pub const REGIONAL_ATM_COUNTS_DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS regional_atm_counts (
        id SERIAL PRIMARY KEY,
        unique_request_id UUID NOT NULL,
        region_code VARCHAR(10) NOT NULL,
        retrieval_timestamp TIMESTAMPTZ NOT NULL,
        count_available INT NOT NULL,
        count_warning INT NOT NULL,
        count_zombie INT NOT NULL,
        count_wounded INT NOT NULL,
        count_out_of_service INT NOT NULL,
        percentage_available NUMERIC(10, 8) NOT NULL,
        percentage_warning NUMERIC(10, 8) NOT NULL,
        percentage_zombie NUMERIC(10, 8) NOT NULL,
        percentage_wounded NUMERIC(10, 8) NOT NULL,
        percentage_out_of_service NUMERIC(10, 8) NOT NULL,
        total_atms_in_region INT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_regional_atm_counts_region_retrieval ON regional_atm_counts (region_code, retrieval_timestamp DESC)",
];

pub const TERMINAL_DETAILS_DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS terminal_details (
        id SERIAL PRIMARY KEY,
        unique_request_id UUID NOT NULL,
        terminal_id VARCHAR(50) NOT NULL,
        location TEXT,
        issue_state_name VARCHAR(50),
        serial_number VARCHAR(50),
        retrieved_date TIMESTAMPTZ NOT NULL,
        fetched_status VARCHAR(50) NOT NULL,
        raw_terminal_data JSONB NOT NULL,
        fault_data JSONB,
        metadata JSONB,
        created_at TIMESTAMPTZ DEFAULT now()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_terminal_details_id_retrieved ON terminal_details (terminal_id, retrieved_date DESC)",
    "CREATE INDEX IF NOT EXISTS idx_terminal_details_fetched_status ON terminal_details (fetched_status)",
    "CREATE INDEX IF NOT EXISTS idx_terminal_details_raw_gin ON terminal_details USING GIN (raw_terminal_data)",
    "CREATE INDEX IF NOT EXISTS idx_terminal_details_fault_gin ON terminal_details USING GIN (fault_data)",
    "CREATE INDEX IF NOT EXISTS idx_terminal_details_metadata_gin ON terminal_details USING GIN (metadata)",
];

pub const TERMINAL_CASH_INFORMATION_DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS terminal_cash_information (
        id SERIAL PRIMARY KEY,
        unique_request_id UUID NOT NULL,
        terminal_id VARCHAR(50) NOT NULL,
        business_code VARCHAR(50),
        technical_code VARCHAR(50),
        external_id VARCHAR(50),
        retrieval_timestamp TIMESTAMPTZ NOT NULL,
        event_date TIMESTAMPTZ NOT NULL,
        total_cash_amount NUMERIC(14, 2),
        total_currency VARCHAR(10),
        cassettes_data JSONB NOT NULL,
        cassette_count INT NOT NULL,
        has_low_cash_warning BOOLEAN NOT NULL,
        has_cash_errors BOOLEAN NOT NULL,
        is_null_record BOOLEAN NOT NULL,
        null_reason TEXT,
        raw_cash_data JSONB NOT NULL,
        created_at TIMESTAMPTZ DEFAULT now()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_terminal_cash_information_terminal_id ON terminal_cash_information (terminal_id)",
    "CREATE INDEX IF NOT EXISTS idx_terminal_cash_information_retrieval ON terminal_cash_information (retrieval_timestamp DESC)",
];

pub async fn apply_ddl(pool: &sqlx::PgPool, statements: &[&str]) -> Result<(), sqlx::Error> {
    for statement in statements {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
