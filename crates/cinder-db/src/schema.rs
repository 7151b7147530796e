//! SQL schema definitions.

/// Complete schema for Cinder v1 database.
pub const SCHEMA_V1: &str = r#"
-- ============================================================
-- Activities
-- ============================================================

CREATE TABLE IF NOT EXISTS activities (
    id TEXT PRIMARY KEY,
    project_id TEXT NOT NULL,
    name TEXT NOT NULL,
    scope TEXT NOT NULL,
    scope3_category INTEGER,
    activity_type TEXT NOT NULL,
    quantity REAL NOT NULL,
    unit TEXT NOT NULL,
    year INTEGER NOT NULL,
    country TEXT,
    material TEXT,
    production_route TEXT,
    fuel_type TEXT,
    distance_km REAL,
    fuel_efficiency REAL,
    supplier_factor REAL,
    tier_level TEXT NOT NULL,
    tier_direction TEXT NOT NULL,
    data_source TEXT NOT NULL,
    data_quality TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'pending',
    error_message TEXT,
    retired INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_activities_project ON activities(project_id);
CREATE INDEX IF NOT EXISTS idx_activities_status ON activities(project_id, status);

-- ============================================================
-- Emission factors & overrides
-- ============================================================

CREATE TABLE IF NOT EXISTS emission_factors (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category TEXT NOT NULL,
    key TEXT NOT NULL,
    year INTEGER NOT NULL,
    value REAL NOT NULL,
    unit TEXT NOT NULL,
    source TEXT NOT NULL,
    active INTEGER NOT NULL DEFAULT 1
);

-- Exactly one active factor per (category, key, year).
CREATE UNIQUE INDEX IF NOT EXISTS idx_factors_active
    ON emission_factors(category, key, year) WHERE active = 1;
CREATE INDEX IF NOT EXISTS idx_factors_key ON emission_factors(category, key);

CREATE TABLE IF NOT EXISTS factor_overrides (
    project_id TEXT NOT NULL,
    category TEXT NOT NULL,
    key TEXT NOT NULL,
    value REAL NOT NULL,
    unit TEXT NOT NULL,
    source TEXT NOT NULL,
    renewable_pct REAL,
    fossil_pct REAL,
    nuclear_pct REAL,
    active INTEGER NOT NULL DEFAULT 1,
    PRIMARY KEY (project_id, category, key)
);

-- ============================================================
-- Calculation results & aggregates
-- ============================================================

CREATE TABLE IF NOT EXISTS calculation_results (
    activity_id TEXT PRIMARY KEY REFERENCES activities(id),
    project_id TEXT NOT NULL,
    provenance TEXT NOT NULL,
    factor_value REAL NOT NULL,
    factor_unit TEXT NOT NULL,
    factor_source TEXT NOT NULL,
    co2e_kg REAL NOT NULL,
    calculated_at INTEGER NOT NULL,
    error TEXT
);

CREATE INDEX IF NOT EXISTS idx_results_project ON calculation_results(project_id);

CREATE TABLE IF NOT EXISTS aggregate_results (
    project_id TEXT NOT NULL,
    kind TEXT NOT NULL,
    payload TEXT NOT NULL,
    computed_at INTEGER NOT NULL,
    PRIMARY KEY (project_id, kind)
);

-- ============================================================
-- Reports & signatures
-- ============================================================

CREATE TABLE IF NOT EXISTS reports (
    id TEXT PRIMARY KEY,
    project_id TEXT NOT NULL,
    standard TEXT NOT NULL,
    payload TEXT NOT NULL,
    missing_fields TEXT NOT NULL,
    incomplete INTEGER NOT NULL DEFAULT 0,
    status TEXT NOT NULL DEFAULT 'draft',
    deadline INTEGER,
    generated_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_reports_project ON reports(project_id);

CREATE TABLE IF NOT EXISTS signatures (
    id TEXT PRIMARY KEY,
    report_id TEXT NOT NULL REFERENCES reports(id),
    signer TEXT NOT NULL,
    role TEXT NOT NULL,
    signed_at INTEGER NOT NULL,
    content_hash BLOB NOT NULL,
    status TEXT NOT NULL DEFAULT 'valid'
);

CREATE INDEX IF NOT EXISTS idx_signatures_report ON signatures(report_id);
"#;
