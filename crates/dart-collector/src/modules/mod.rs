//! 데이터 수집 모듈.

pub mod classify;
pub mod directory;
pub mod enrichment;
pub mod pipeline;
pub mod reports;

pub use classify::{classify, normalize_results, IntegrityFailure, NormalizedBatch};
pub use directory::{fetch_directory, select_listed};
pub use enrichment::{enrich_entities, EnrichmentFailure, EnrichmentOutcome, EnrichmentResult};
pub use pipeline::{artifact_name, run_company_pipeline, PipelineReport};
pub use reports::{
    export_disclosures, export_document_text, export_executive_shareholdings,
    export_financial_statements, export_major_shareholdings, resolve_corp_code,
};
