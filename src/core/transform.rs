use crate::domain::model::{BankRecord, Currency, Dataset, EnrichedBankRecord, ExchangeRateTable};
use crate::utils::error::{EtlError, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RateRow {
    #[serde(rename = "Currency")]
    currency: String,
    #[serde(rename = "Rate")]
    rate: f64,
}

/// Reads a `Currency,Rate` CSV into a lookup table. Extra columns are ignored.
pub fn parse_exchange_rates(data: &[u8]) -> Result<ExchangeRateTable> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data);

    let mut table = ExchangeRateTable::new();
    for row in reader.deserialize() {
        let RateRow { currency, rate } = row?;
        if !rate.is_finite() || rate <= 0.0 {
            return Err(EtlError::parse(format!(
                "exchange rate for {} must be a positive number, got {}",
                currency, rate
            )));
        }
        table.insert(currency, rate);
    }

    Ok(table)
}

/// 四捨五入到小數點後兩位 (half away from zero)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy)]
struct ResolvedRates {
    gbp: f64,
    inr: f64,
    eur: f64,
}

impl ResolvedRates {
    fn resolve(rates: &ExchangeRateTable) -> Result<Self> {
        let lookup = |currency: Currency| {
            rates
                .get(currency.code())
                .ok_or_else(|| EtlError::RateLookupError {
                    currency: currency.code().to_string(),
                })
        };

        Ok(Self {
            gbp: lookup(Currency::Gbp)?,
            inr: lookup(Currency::Inr)?,
            eur: lookup(Currency::Eur)?,
        })
    }
}

/// Derives GBP/INR/EUR market caps for every record, keeping order and count.
///
/// All three rates are resolved up front, so a missing currency fails even
/// when `records` is empty.
pub fn enrich(records: Vec<BankRecord>, rates: &ExchangeRateTable) -> Result<Dataset> {
    let resolved = ResolvedRates::resolve(rates)?;

    Ok(records
        .into_iter()
        .map(|record| EnrichedBankRecord {
            market_cap_gbp: round2(record.market_cap_usd * resolved.gbp),
            market_cap_inr: round2(record.market_cap_usd * resolved.inr),
            market_cap_eur: round2(record.market_cap_usd * resolved.eur),
            market_cap_usd: record.market_cap_usd,
            name: record.name,
        })
        .collect())
}
