use crate::domain::model::{Dataset, QueryResult};
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::validate_identifier;
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection};
use std::io::Write;
use std::path::Path;

pub fn open_database(path: impl AsRef<Path>) -> Result<Connection> {
    let conn = Connection::open(path.as_ref())?;
    tracing::debug!("Opened SQLite database at {}", path.as_ref().display());
    Ok(conn)
}

/// Closes the handle and surfaces any error SQLite reports on close.
pub fn close_database(conn: Connection) -> Result<()> {
    conn.close().map_err(|(_, e)| EtlError::DatabaseError(e))
}

/// Replaces `table_name` with the dataset's rows in a single transaction.
pub fn write_table(dataset: &Dataset, conn: &mut Connection, table_name: &str) -> Result<()> {
    validate_identifier("table_name", table_name)?;

    let tx = conn.transaction()?;
    tx.execute_batch(&format!(
        "DROP TABLE IF EXISTS \"{table}\";
         CREATE TABLE \"{table}\" (
             \"Name\" TEXT,
             \"MC_USD_Billion\" REAL,
             \"MC_GBP_Billion\" REAL,
             \"MC_INR_Billion\" REAL,
             \"MC_EUR_Billion\" REAL
         );",
        table = table_name
    ))?;

    {
        let mut stmt = tx.prepare(&format!(
            "INSERT INTO \"{}\" (\"Name\", \"MC_USD_Billion\", \"MC_GBP_Billion\", \"MC_INR_Billion\", \"MC_EUR_Billion\")
             VALUES (?1, ?2, ?3, ?4, ?5)",
            table_name
        ))?;
        for record in dataset.iter() {
            stmt.execute(params![
                record.name,
                record.market_cap_usd,
                record.market_cap_gbp,
                record.market_cap_inr,
                record.market_cap_eur,
            ])?;
        }
    }

    tx.commit()?;
    tracing::debug!("Wrote {} rows to table {}", dataset.len(), table_name);
    Ok(())
}

fn to_json(value: ValueRef<'_>) -> serde_json::Value {
    match value {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Integer(v) => serde_json::Value::from(v),
        ValueRef::Real(v) => serde_json::Number::from_f64(v)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Text(v) => serde_json::Value::String(String::from_utf8_lossy(v).into_owned()),
        ValueRef::Blob(_) => serde_json::Value::String("[BLOB]".to_string()),
    }
}

/// Runs one read-only statement and collects every row.
pub fn run_query(conn: &Connection, query: &str) -> Result<QueryResult> {
    let query_error = |e: rusqlite::Error| EtlError::QueryError {
        query: query.to_string(),
        message: e.to_string(),
    };

    let mut stmt = conn.prepare(query).map_err(query_error)?;
    if !stmt.readonly() {
        return Err(EtlError::QueryError {
            query: query.to_string(),
            message: "only read-only statements are allowed".to_string(),
        });
    }

    let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
    let column_count = columns.len();

    let mut rows = Vec::new();
    let mut cursor = stmt.query([]).map_err(query_error)?;
    while let Some(row) = cursor.next().map_err(query_error)? {
        let values = (0..column_count)
            .map(|i| row.get_ref(i).map(to_json))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(query_error)?;
        rows.push(values);
    }

    Ok(QueryResult {
        query: query.to_string(),
        columns,
        rows,
    })
}

/// Executes the queries in order, writing each query followed by its result to `out`.
/// The first failing query aborts the run.
pub fn run_queries<S: AsRef<str>, W: Write>(
    queries: &[S],
    conn: &Connection,
    out: &mut W,
) -> Result<Vec<QueryResult>> {
    let mut results = Vec::with_capacity(queries.len());

    for query in queries {
        let query = query.as_ref();
        tracing::debug!("Running query: {}", query);

        writeln!(out, "{}", query)?;
        let result = run_query(conn, query)?;
        writeln!(out, "{}\n", result)?;

        results.push(result);
    }

    Ok(results)
}
