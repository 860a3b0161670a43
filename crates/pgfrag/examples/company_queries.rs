//! Prints the statements a companies model would run for an update and a search.
//!
//! ```bash
//! cargo run --example company_queries -p pgfrag
//! ```

use pgfrag::{FragResult, NameTranslation, sql_for_filtering_companies, sql_for_partial_update};
use serde_json::json;

fn main() -> FragResult<()> {
    let translation = NameTranslation::new()
        .map("numEmployees", "num_employees")
        .map("logoUrl", "logo_url");

    let set = sql_for_partial_update(
        &json!({"description": "Now with more widgets", "numEmployees": 120}),
        &translation,
    )?;
    println!(
        "UPDATE companies SET {} WHERE handle = {} RETURNING handle, name",
        set.clause(),
        set.next_placeholder()
    );
    println!("  values: {:?} + [\"acme\"]", set.values());

    let filter = sql_for_filtering_companies(&json!({"nameLike": "net", "minEmployees": "10"}))?;
    println!(
        "SELECT handle, name, num_employees FROM companies{} ORDER BY name",
        filter.prefixed("WHERE")
    );
    println!("  values: {:?}", filter.values());

    if let Err(e) = sql_for_partial_update(&json!({}), &translation) {
        println!("empty update -> {} ({e})", e.status_code());
    }

    Ok(())
}
