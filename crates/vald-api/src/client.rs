//! Composite clients over a shared channel.
//!
//! Generated clients are cheap to construct; each accessor wraps a clone of
//! the underlying [`Channel`], so all services share one HTTP/2 connection.

use tonic::codegen::StdError;
use tonic::transport::{Channel, Endpoint};

use crate::meta::v1::insert_with_metadata_client::InsertWithMetadataClient;
use crate::meta::v1::object_with_metadata_client::ObjectWithMetadataClient;
use crate::meta::v1::remove_with_metadata_client::RemoveWithMetadataClient;
use crate::meta::v1::search_with_metadata_client::SearchWithMetadataClient;
use crate::meta::v1::update_with_metadata_client::UpdateWithMetadataClient;
use crate::meta::v1::upsert_with_metadata_client::UpsertWithMetadataClient;
use crate::vald::v1::filter_client::FilterClient;
use crate::vald::v1::flush_client::FlushClient;
use crate::vald::v1::index_client::IndexClient;
use crate::vald::v1::insert_client::InsertClient;
use crate::vald::v1::object_client::ObjectClient;
use crate::vald::v1::remove_client::RemoveClient;
use crate::vald::v1::search_client::SearchClient;
use crate::vald::v1::update_client::UpdateClient;
use crate::vald::v1::upsert_client::UpsertClient;

async fn connect_channel<D>(dst: D) -> Result<Channel, tonic::transport::Error>
where
    D: TryInto<Endpoint>,
    D::Error: Into<StdError>,
{
    Endpoint::new(dst)?.connect().await
}

/// Client for every `vald.v1` service except `Filter`.
#[derive(Debug, Clone)]
pub struct Client {
    channel: Channel,
}

impl Client {
    pub fn new(channel: Channel) -> Self {
        Self { channel }
    }

    /// Connect to `dst`, e.g. `"http://127.0.0.1:8081"`.
    pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
    where
        D: TryInto<Endpoint>,
        D::Error: Into<StdError>,
    {
        Ok(Self::new(connect_channel(dst).await?))
    }

    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    pub fn insert(&self) -> InsertClient<Channel> {
        InsertClient::new(self.channel.clone())
    }

    pub fn update(&self) -> UpdateClient<Channel> {
        UpdateClient::new(self.channel.clone())
    }

    pub fn upsert(&self) -> UpsertClient<Channel> {
        UpsertClient::new(self.channel.clone())
    }

    pub fn remove(&self) -> RemoveClient<Channel> {
        RemoveClient::new(self.channel.clone())
    }

    pub fn search(&self) -> SearchClient<Channel> {
        SearchClient::new(self.channel.clone())
    }

    pub fn object(&self) -> ObjectClient<Channel> {
        ObjectClient::new(self.channel.clone())
    }

    pub fn index(&self) -> IndexClient<Channel> {
        IndexClient::new(self.channel.clone())
    }

    pub fn flush(&self) -> FlushClient<Channel> {
        FlushClient::new(self.channel.clone())
    }
}

/// [`Client`] plus the `Filter` service.
#[derive(Debug, Clone)]
pub struct ClientWithFilter {
    client: Client,
}

impl ClientWithFilter {
    pub fn new(channel: Channel) -> Self {
        Self {
            client: Client::new(channel),
        }
    }

    pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
    where
        D: TryInto<Endpoint>,
        D::Error: Into<StdError>,
    {
        Ok(Self::new(connect_channel(dst).await?))
    }

    pub fn filter(&self) -> FilterClient<Channel> {
        FilterClient::new(self.client.channel.clone())
    }
}

impl std::ops::Deref for ClientWithFilter {
    type Target = Client;

    fn deref(&self) -> &Client {
        &self.client
    }
}

/// Client for every `meta.v1` service.
#[derive(Debug, Clone)]
pub struct ClientWithMetadata {
    channel: Channel,
}

impl ClientWithMetadata {
    pub fn new(channel: Channel) -> Self {
        Self { channel }
    }

    pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
    where
        D: TryInto<Endpoint>,
        D::Error: Into<StdError>,
    {
        Ok(Self::new(connect_channel(dst).await?))
    }

    pub fn insert(&self) -> InsertWithMetadataClient<Channel> {
        InsertWithMetadataClient::new(self.channel.clone())
    }

    pub fn update(&self) -> UpdateWithMetadataClient<Channel> {
        UpdateWithMetadataClient::new(self.channel.clone())
    }

    pub fn upsert(&self) -> UpsertWithMetadataClient<Channel> {
        UpsertWithMetadataClient::new(self.channel.clone())
    }

    pub fn remove(&self) -> RemoveWithMetadataClient<Channel> {
        RemoveWithMetadataClient::new(self.channel.clone())
    }

    pub fn search(&self) -> SearchWithMetadataClient<Channel> {
        SearchWithMetadataClient::new(self.channel.clone())
    }

    pub fn object(&self) -> ObjectWithMetadataClient<Channel> {
        ObjectWithMetadataClient::new(self.channel.clone())
    }
}

impl From<Client> for ClientWithMetadata {
    fn from(client: Client) -> Self {
        Self::new(client.channel)
    }
}
