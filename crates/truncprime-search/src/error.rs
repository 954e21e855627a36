use truncprime_oracle::OracleError;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("primality oracle failed at {width} digits: {source}")]
    Oracle {
        width: usize,
        #[source]
        source: OracleError,
    },
}
