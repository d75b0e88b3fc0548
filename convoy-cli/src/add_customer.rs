//! Add-customer command implementation for the Convoy CLI.

use camino::Utf8PathBuf;
use clap::Parser;
use convoy_data::{CustomerRecord, append_customer};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_CUSTOMERS, ARG_DEMAND, ARG_LATITUDE, ARG_LONGITUDE, CliError, ENV_ADD_CUSTOMER_CUSTOMERS,
    ENV_ADD_CUSTOMER_DEMAND, ENV_ADD_CUSTOMER_LATITUDE, ENV_ADD_CUSTOMER_LONGITUDE,
    require_existing,
};

/// CLI arguments for the `add-customer` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "add-customer",
    long_about = "Append one customer row to an existing CSV table. The \
                 table's header decides the column order; columns other \
                 than latitude, longitude and demand are left empty.",
    about = "Append a customer to a customer table"
)]
#[ortho_config(prefix = "CONVOY")]
pub(crate) struct AddCustomerArgs {
    /// Path to the customer CSV table.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) customers_path: Option<Utf8PathBuf>,
    /// Customer latitude in degrees.
    #[arg(long = ARG_LATITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) latitude: Option<f64>,
    /// Customer longitude in degrees.
    #[arg(long = ARG_LONGITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) longitude: Option<f64>,
    /// Customer demand in load units.
    #[arg(long = ARG_DEMAND, value_name = "units", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) demand: Option<i64>,
}

impl AddCustomerArgs {
    pub(crate) fn into_config(self) -> Result<AddCustomerConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        AddCustomerConfig::try_from(merged)
    }
}

/// Resolved `add-customer` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AddCustomerConfig {
    pub(crate) customers_path: Utf8PathBuf,
    pub(crate) record: CustomerRecord,
}

impl TryFrom<AddCustomerArgs> for AddCustomerConfig {
    type Error = CliError;

    fn try_from(args: AddCustomerArgs) -> Result<Self, Self::Error> {
        let customers_path = args.customers_path.ok_or(CliError::MissingArgument {
            field: ARG_CUSTOMERS,
            env: ENV_ADD_CUSTOMER_CUSTOMERS,
        })?;
        let latitude = args.latitude.ok_or(CliError::MissingArgument {
            field: ARG_LATITUDE,
            env: ENV_ADD_CUSTOMER_LATITUDE,
        })?;
        let longitude = args.longitude.ok_or(CliError::MissingArgument {
            field: ARG_LONGITUDE,
            env: ENV_ADD_CUSTOMER_LONGITUDE,
        })?;
        let demand = args.demand.ok_or(CliError::MissingArgument {
            field: ARG_DEMAND,
            env: ENV_ADD_CUSTOMER_DEMAND,
        })?;
        Ok(Self {
            customers_path,
            record: CustomerRecord::new(latitude, longitude, demand),
        })
    }
}

pub(crate) fn run_add_customer(args: AddCustomerArgs) -> Result<(), CliError> {
    let config = args.into_config()?;
    add_customer(&config)
}

pub(crate) fn add_customer(config: &AddCustomerConfig) -> Result<(), CliError> {
    require_existing(&config.customers_path, ARG_CUSTOMERS)?;
    append_customer(&config.customers_path, &config.record)?;
    Ok(())
}
