//! Account-level options: custom booking channels and income methods.

use serde::{Deserialize, Serialize};

use crate::client::HostexClient;
use crate::context::CallContext;
use crate::error::HostexError;
use crate::http::HttpMethod;
use crate::transport::Transport;
use crate::types::{CustomChannel, IncomeMethod};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomChannels {
    #[serde(default)]
    pub custom_channels: Vec<CustomChannel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeMethods {
    #[serde(default)]
    pub income_methods: Vec<IncomeMethod>,
}

impl<T: Transport> HostexClient<T> {
    pub async fn list_custom_channels(&self, ctx: &CallContext) -> Result<CustomChannels, HostexError> {
        self.request(ctx, HttpMethod::Get, "/custom_channels", None, None::<&()>)
            .await
    }

    pub async fn list_income_methods(&self, ctx: &CallContext) -> Result<IncomeMethods, HostexError> {
        self.request(ctx, HttpMethod::Get, "/income_methods", None, None::<&()>)
            .await
    }
}
