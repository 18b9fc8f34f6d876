//! A service implementation that answers every RPC with `UNIMPLEMENTED`.
//!
//! Every generated service trait has a default body for each method, so
//! [`Unimplemented`] is a set of empty impl blocks. Mount it for services a
//! deployment does not provide. Routes registered through [`crate::server`]
//! rewrite the default status so that it names the method, as
//! [`unimplemented`] does.

use tonic::Status;

use crate::meta::v1::insert_with_metadata_server::InsertWithMetadata;
use crate::meta::v1::object_with_metadata_server::ObjectWithMetadata;
use crate::meta::v1::remove_with_metadata_server::RemoveWithMetadata;
use crate::meta::v1::search_with_metadata_server::SearchWithMetadata;
use crate::meta::v1::update_with_metadata_server::UpdateWithMetadata;
use crate::meta::v1::upsert_with_metadata_server::UpsertWithMetadata;
use crate::vald::v1::filter_server::Filter;
use crate::vald::v1::flush_server::Flush;
use crate::vald::v1::index_server::Index;
use crate::vald::v1::insert_server::Insert;
use crate::vald::v1::object_server::Object;
use crate::vald::v1::remove_server::Remove;
use crate::vald::v1::search_server::Search;
use crate::vald::v1::update_server::Update;
use crate::vald::v1::upsert_server::Upsert;

/// Answers every RPC with `UNIMPLEMENTED`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unimplemented;

/// The status returned for a method that is not implemented.
pub fn unimplemented(method: &str) -> Status {
    Status::unimplemented(format!("method {method} not implemented"))
}

impl Insert for Unimplemented {}
impl Update for Unimplemented {}
impl Upsert for Unimplemented {}
impl Remove for Unimplemented {}
impl Search for Unimplemented {}
impl Object for Unimplemented {}
impl Index for Unimplemented {}
impl Flush for Unimplemented {}
impl Filter for Unimplemented {}

impl InsertWithMetadata for Unimplemented {}
impl UpdateWithMetadata for Unimplemented {}
impl UpsertWithMetadata for Unimplemented {}
impl RemoveWithMetadata for Unimplemented {}
impl SearchWithMetadata for Unimplemented {}
impl ObjectWithMetadata for Unimplemented {}
