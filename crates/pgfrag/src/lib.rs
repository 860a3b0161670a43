//! # pgfrag
//!
//! Parameterized PostgreSQL clause fragments for a data-access layer.
//!
//! - **Partial updates**: `{"firstName": "Aliya", "age": 32}` →
//!   `"first_name"=$1, "age"=$2` + `["Aliya", 32]`
//! - **Filters**: `{"nameLike": "net", "minEmployees": 10}` →
//!   `name ILIKE '%' || $1 || '%' AND num_employees >= $2` + `["net", 10]`
//!
//! Fragments are clause bodies only; the caller splices them into a full
//! statement and passes [`SqlFragment::params`] to tokio-postgres.
//!
//! ```ignore
//! use pgfrag::{NameTranslation, sql_for_partial_update};
//!
//! let translation = NameTranslation::new().map("numEmployees", "num_employees");
//! let frag = sql_for_partial_update(&body, &translation)?;
//! let sql = format!(
//!     "UPDATE companies SET {} WHERE handle = {} RETURNING handle, name",
//!     frag.clause(),
//!     frag.next_placeholder(),
//! );
//! let mut params = frag.params();
//! params.push(handle);
//! let row = client.query_one(&sql, &params.as_refs()).await?;
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod fragment;
pub mod ident;
pub mod param;
pub mod translation;
pub mod update;

pub use config::FragConfig;
pub use error::{FragError, FragResult, InputErrorKind};
pub use filter::{
    COMPANY_FILTER, CompanyFilter, FilterField, FilterOptions, FilterSpec, Predicate, UnknownKeys,
    sql_for_filtering_companies, sql_for_filtering_companies_with,
};
pub use fragment::SqlFragment;
pub use param::{JsonParam, Param, ParamList};
pub use translation::{Fallback, NameTranslation};
pub use update::{UpdateFields, sql_for_partial_update};
