// sql_joiner.rs
use crate::column_validator::validate_column;
use crate::dataset_loader::{Dataset, DatasetCollection};
use crate::error::{BroError, BroResult};
use crate::user_interaction::{prompt_until, Prompter};
use std::fmt;
use tracing::debug;

/// One `LEFT JOIN ... ON base.col = table.col` hop off the base table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinClause {
    pub base_table: String,
    pub base_column: String,
    pub table: String,
    pub column: String,
}

impl fmt::Display for JoinClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\nLEFT JOIN {} \n\tON {}.{} = {}.{}",
            self.table, self.base_table, self.base_column, self.table, self.column
        )
    }
}

/// Strips the select's trailing semicolon(s), tacks on each join and
/// closes the statement again.
pub fn append_joins(select_sql: &str, joins: &[JoinClause]) -> String {
    let mut sql = select_sql.trim_end_matches(';').to_string();
    for join in joins {
        sql.push_str(&join.to_string());
    }
    sql.push(';');
    sql
}

pub fn base_column_prompt(base: &Dataset, table: &Dataset) -> String {
    format!(
        "Enter the column from '{}' to join on {}: ",
        base.prefix(),
        table.prefix()
    )
}

pub fn join_column_prompt(table: &Dataset) -> String {
    format!("Enter the matching column from '{}': ", table.prefix())
}

fn prompt_column(prompter: &mut dyn Prompter, prompt: &str, dataset: &Dataset) -> BroResult<String> {
    prompt_until(prompter, prompt, |_, answer| {
        let column = answer.trim();
        validate_column(dataset, column).map(|()| column.to_string())
    })
}

/// Asks for the key pair linking `table` to `base`. A bad answer only
/// repeats the question it belongs to.
pub fn prompt_join(
    prompter: &mut dyn Prompter,
    base: &Dataset,
    table: &Dataset,
) -> BroResult<JoinClause> {
    let base_column = prompt_column(prompter, &base_column_prompt(base, table), base)?;
    let column = prompt_column(prompter, &join_column_prompt(table), table)?;

    Ok(JoinClause {
        base_table: base.prefix().to_string(),
        base_column,
        table: table.prefix().to_string(),
        column,
    })
}

/// Left joins every non-base dataset onto the base table, in load order.
pub fn build_joins(
    prompter: &mut dyn Prompter,
    datasets: &DatasetCollection,
    select_sql: &str,
) -> BroResult<String> {
    let base = datasets.base().ok_or(BroError::NoDatasets)?;

    let mut joins = Vec::with_capacity(datasets.joined().len());
    for table in datasets.joined() {
        let join = prompt_join(prompter, base, table)?;
        debug!(table = %join.table, on = %join.base_column, "join added");
        joins.push(join);
    }

    Ok(append_joins(select_sql, &joins))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user_interaction::ScriptedPrompter;

    fn shop() -> DatasetCollection {
        let mut datasets = DatasetCollection::new();
        for dataset in [
            Dataset::new("orders", vec!["order_id".into(), "cust_id".into(), "sku".into()], 3),
            Dataset::new("customers", vec!["cust_id".into(), "name".into()], 2),
            Dataset::new("products", vec!["product_sku".into(), "price".into()], 5),
        ] {
            datasets.insert(dataset).unwrap();
        }
        datasets
    }

    fn orders_and_customers() -> DatasetCollection {
        let mut datasets = DatasetCollection::new();
        datasets
            .insert(Dataset::new("orders", vec!["order_id".into(), "cust_id".into()], 3))
            .unwrap();
        datasets
            .insert(Dataset::new("customers", vec!["cust_id".into(), "name".into()], 2))
            .unwrap();
        datasets
    }

    #[test]
    fn join_clause_layout() {
        let join = JoinClause {
            base_table: "orders".into(),
            base_column: "cust_id".into(),
            table: "customers".into(),
            column: "cust_id".into(),
        };
        assert_eq!(
            join.to_string(),
            "\nLEFT JOIN customers \n\tON orders.cust_id = customers.cust_id"
        );
    }

    #[test]
    fn append_joins_moves_the_semicolon_to_the_end() {
        let join = JoinClause {
            base_table: "a".into(),
            base_column: "k".into(),
            table: "b".into(),
            column: "k2".into(),
        };
        assert_eq!(
            append_joins("SELECT * FROM a;", &[join]),
            "SELECT * FROM a\nLEFT JOIN b \n\tON a.k = b.k2;"
        );
        assert_eq!(append_joins("SELECT * FROM a;;", &[]), "SELECT * FROM a;");
    }

    #[test]
    fn orders_left_join_customers() {
        let mut prompter = ScriptedPrompter::new(["cust_id", "cust_id"]);
        let sql = build_joins(&mut prompter, &orders_and_customers(), "SELECT * FROM orders;")
            .unwrap();
        assert_eq!(
            sql,
            "SELECT * FROM orders\nLEFT JOIN customers \n\tON orders.cust_id = customers.cust_id;"
        );
    }

    #[test]
    fn bad_base_column_reprompts_that_column_only() {
        let datasets = orders_and_customers();
        let base = datasets.base().unwrap();
        let customers = &datasets.joined()[0];

        let mut prompter = ScriptedPrompter::new(["name", " cust_id ", "cust_id"]);
        let sql = build_joins(&mut prompter, &datasets, "SELECT order_id FROM orders;").unwrap();

        assert_eq!(
            sql,
            "SELECT order_id FROM orders\nLEFT JOIN customers \n\tON orders.cust_id = customers.cust_id;"
        );
        assert_eq!(prompter.times_asked(&base_column_prompt(base, customers)), 2);
        assert_eq!(prompter.times_asked(&join_column_prompt(customers)), 1);
        assert!(prompter
            .transcript()
            .contains(&"  Column 'name' not in orders. Try again.".to_string()));
    }

    #[test]
    fn bad_join_column_keeps_the_base_column() {
        let datasets = orders_and_customers();
        let base = datasets.base().unwrap();
        let customers = &datasets.joined()[0];

        let mut prompter = ScriptedPrompter::new(["cust_id", "order_id", "cust_id"]);
        let join = prompt_join(&mut prompter, base, customers).unwrap();

        assert_eq!(join.base_column, "cust_id");
        assert_eq!(join.column, "cust_id");
        assert_eq!(prompter.times_asked(&base_column_prompt(base, customers)), 1);
        assert_eq!(prompter.times_asked(&join_column_prompt(customers)), 2);
    }

    #[test]
    fn every_extra_dataset_joins_against_the_base() {
        let mut prompter = ScriptedPrompter::new(["cust_id", "cust_id", "sku", "product_sku"]);
        let sql = build_joins(&mut prompter, &shop(), "SELECT DISTINCT * FROM orders;").unwrap();
        assert_eq!(
            sql,
            "SELECT DISTINCT * FROM orders\
             \nLEFT JOIN customers \n\tON orders.cust_id = customers.cust_id\
             \nLEFT JOIN products \n\tON orders.sku = products.product_sku;"
        );
    }

    #[test]
    fn closed_input_mid_join_is_an_error() {
        let mut prompter = ScriptedPrompter::new(["cust_id"]);
        let result = build_joins(&mut prompter, &orders_and_customers(), "SELECT * FROM orders;");
        assert!(matches!(result, Err(BroError::InputClosed)));
    }
}
