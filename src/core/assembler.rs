//! Row assembler
//!
//! Turns one bank movement into one HomeBank ledger row by combining the
//! type decomposer, payee extractor and category mapper. Rows are independent
//! of each other; the assembler only accumulates the set of category tokens
//! seen, which is reported to the operator after the run.

use crate::core::category::CategoryMapper;
use crate::core::decomposer::decompose;
use crate::core::payee::payee_name;
use crate::types::{LedgerRow, TransactionRow};
use std::collections::BTreeSet;
use tracing::debug;

/// Builds ledger rows and records the category tokens encountered
#[derive(Debug)]
pub struct RowAssembler<'a> {
    mapper: &'a CategoryMapper,
    category_tokens: BTreeSet<String>,
}

impl<'a> RowAssembler<'a> {
    pub fn new(mapper: &'a CategoryMapper) -> Self {
        RowAssembler {
            mapper,
            category_tokens: BTreeSet::new(),
        }
    }

    /// Convert a single bank movement
    pub fn assemble(&mut self, row: &TransactionRow) -> LedgerRow {
        let decomposed = decompose(&row.type_text);
        let payee = payee_name(&row.type_text);
        let payment = self.mapper.map(&decomposed.category_token);

        debug!(
            type_text = %row.type_text,
            category = %decomposed.category_token,
            payment = payment.code(),
            payee = payee.as_deref().unwrap_or(""),
            "decomposed transaction type"
        );

        self.category_tokens.insert(decomposed.category_token.clone());

        LedgerRow {
            date: row.date,
            payment,
            info: decomposed.remainder,
            payee,
            memo: decomposed.category_token,
            amount: row.amount(),
            category: None,
            tags: None,
        }
    }

    /// Convert every movement, preserving order
    pub fn assemble_all<'r, I>(&mut self, rows: I) -> Vec<LedgerRow>
    where
        I: IntoIterator<Item = &'r TransactionRow>,
    {
        rows.into_iter().map(|row| self.assemble(row)).collect()
    }

    /// Distinct category tokens seen so far, sorted
    pub fn category_tokens(&self) -> &BTreeSet<String> {
        &self.category_tokens
    }

    /// Tokens seen so far that have no entry in the mapping table
    pub fn unmapped_tokens(&self) -> BTreeSet<String> {
        self.category_tokens
            .iter()
            .filter(|token| !self.mapper.is_mapped(token))
            .cloned()
            .collect()
    }

    /// Consume the assembler, keeping the tokens seen
    pub fn into_category_tokens(self) -> BTreeSet<String> {
        self.category_tokens
    }
}
