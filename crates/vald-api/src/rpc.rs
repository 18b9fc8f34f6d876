//! RPC names, streaming modes and the method catalogue.
//!
//! Every method exposed by this crate is listed in [`METHODS`] with its
//! package, service, method name and [`StreamingMode`]. The full method path
//! used on the wire is `/<package>.<Service>/<Method>`.

use std::fmt;

pub const PACKAGE_NAME: &str = "vald.v1";
pub const META_PACKAGE_NAME: &str = "meta.v1";

// vald.v1 services
pub const INSERT_RPC_SERVICE_NAME: &str = "Insert";
pub const UPDATE_RPC_SERVICE_NAME: &str = "Update";
pub const UPSERT_RPC_SERVICE_NAME: &str = "Upsert";
pub const REMOVE_RPC_SERVICE_NAME: &str = "Remove";
pub const SEARCH_RPC_SERVICE_NAME: &str = "Search";
pub const OBJECT_RPC_SERVICE_NAME: &str = "Object";
pub const INDEX_RPC_SERVICE_NAME: &str = "Index";
pub const FLUSH_RPC_SERVICE_NAME: &str = "Flush";
pub const FILTER_RPC_SERVICE_NAME: &str = "Filter";

// meta.v1 services
pub const INSERT_WITH_METADATA_RPC_SERVICE_NAME: &str = "InsertWithMetadata";
pub const UPDATE_WITH_METADATA_RPC_SERVICE_NAME: &str = "UpdateWithMetadata";
pub const UPSERT_WITH_METADATA_RPC_SERVICE_NAME: &str = "UpsertWithMetadata";
pub const REMOVE_WITH_METADATA_RPC_SERVICE_NAME: &str = "RemoveWithMetadata";
pub const SEARCH_WITH_METADATA_RPC_SERVICE_NAME: &str = "SearchWithMetadata";
pub const OBJECT_WITH_METADATA_RPC_SERVICE_NAME: &str = "ObjectWithMetadata";

// Insert
pub const INSERT_RPC_NAME: &str = "Insert";
pub const STREAM_INSERT_RPC_NAME: &str = "StreamInsert";
pub const MULTI_INSERT_RPC_NAME: &str = "MultiInsert";

// Update
pub const UPDATE_RPC_NAME: &str = "Update";
pub const STREAM_UPDATE_RPC_NAME: &str = "StreamUpdate";
pub const MULTI_UPDATE_RPC_NAME: &str = "MultiUpdate";
pub const UPDATE_TIMESTAMP_RPC_NAME: &str = "UpdateTimestamp";

// Upsert
pub const UPSERT_RPC_NAME: &str = "Upsert";
pub const STREAM_UPSERT_RPC_NAME: &str = "StreamUpsert";
pub const MULTI_UPSERT_RPC_NAME: &str = "MultiUpsert";

// Remove
pub const REMOVE_RPC_NAME: &str = "Remove";
pub const REMOVE_BY_TIMESTAMP_RPC_NAME: &str = "RemoveByTimestamp";
pub const STREAM_REMOVE_RPC_NAME: &str = "StreamRemove";
pub const MULTI_REMOVE_RPC_NAME: &str = "MultiRemove";

// Search
pub const SEARCH_RPC_NAME: &str = "Search";
pub const SEARCH_BY_ID_RPC_NAME: &str = "SearchByID";
pub const STREAM_SEARCH_RPC_NAME: &str = "StreamSearch";
pub const STREAM_SEARCH_BY_ID_RPC_NAME: &str = "StreamSearchByID";
pub const MULTI_SEARCH_RPC_NAME: &str = "MultiSearch";
pub const MULTI_SEARCH_BY_ID_RPC_NAME: &str = "MultiSearchByID";
pub const LINEAR_SEARCH_RPC_NAME: &str = "LinearSearch";
pub const LINEAR_SEARCH_BY_ID_RPC_NAME: &str = "LinearSearchByID";
pub const STREAM_LINEAR_SEARCH_RPC_NAME: &str = "StreamLinearSearch";
pub const STREAM_LINEAR_SEARCH_BY_ID_RPC_NAME: &str = "StreamLinearSearchByID";
pub const MULTI_LINEAR_SEARCH_RPC_NAME: &str = "MultiLinearSearch";
pub const MULTI_LINEAR_SEARCH_BY_ID_RPC_NAME: &str = "MultiLinearSearchByID";

// Object
pub const EXISTS_RPC_NAME: &str = "Exists";
pub const GET_OBJECT_RPC_NAME: &str = "GetObject";
pub const STREAM_GET_OBJECT_RPC_NAME: &str = "StreamGetObject";
pub const STREAM_LIST_OBJECT_RPC_NAME: &str = "StreamListObject";
pub const GET_TIMESTAMP_RPC_NAME: &str = "GetTimestamp";

// Index
pub const INDEX_INFO_RPC_NAME: &str = "IndexInfo";
pub const INDEX_DETAIL_RPC_NAME: &str = "IndexDetail";
pub const INDEX_STATISTICS_RPC_NAME: &str = "IndexStatistics";
pub const INDEX_STATISTICS_DETAIL_RPC_NAME: &str = "IndexStatisticsDetail";
pub const INDEX_PROPERTY_RPC_NAME: &str = "IndexProperty";

// Flush
pub const FLUSH_RPC_NAME: &str = "Flush";

// Filter
pub const SEARCH_OBJECT_RPC_NAME: &str = "SearchObject";
pub const MULTI_SEARCH_OBJECT_RPC_NAME: &str = "MultiSearchObject";
pub const STREAM_SEARCH_OBJECT_RPC_NAME: &str = "StreamSearchObject";
pub const INSERT_OBJECT_RPC_NAME: &str = "InsertObject";
pub const STREAM_INSERT_OBJECT_RPC_NAME: &str = "StreamInsertObject";
pub const MULTI_INSERT_OBJECT_RPC_NAME: &str = "MultiInsertObject";
pub const UPDATE_OBJECT_RPC_NAME: &str = "UpdateObject";
pub const STREAM_UPDATE_OBJECT_RPC_NAME: &str = "StreamUpdateObject";
pub const MULTI_UPDATE_OBJECT_RPC_NAME: &str = "MultiUpdateObject";
pub const UPSERT_OBJECT_RPC_NAME: &str = "UpsertObject";
pub const STREAM_UPSERT_OBJECT_RPC_NAME: &str = "StreamUpsertObject";
pub const MULTI_UPSERT_OBJECT_RPC_NAME: &str = "MultiUpsertObject";

// InsertWithMetadata
pub const INSERT_WITH_METADATA_RPC_NAME: &str = "InsertWithMetadata";
pub const STREAM_INSERT_WITH_METADATA_RPC_NAME: &str = "StreamInsertWithMetadata";
pub const MULTI_INSERT_WITH_METADATA_RPC_NAME: &str = "MultiInsertWithMetadata";

// UpdateWithMetadata
pub const UPDATE_WITH_METADATA_RPC_NAME: &str = "UpdateWithMetadata";
pub const STREAM_UPDATE_WITH_METADATA_RPC_NAME: &str = "StreamUpdateWithMetadata";
pub const MULTI_UPDATE_WITH_METADATA_RPC_NAME: &str = "MultiUpdateWithMetadata";
pub const UPDATE_TIMESTAMP_WITH_METADATA_RPC_NAME: &str = "UpdateTimestampWithMetadata";

// UpsertWithMetadata
pub const UPSERT_WITH_METADATA_RPC_NAME: &str = "UpsertWithMetadata";
pub const STREAM_UPSERT_WITH_METADATA_RPC_NAME: &str = "StreamUpsertWithMetadata";
pub const MULTI_UPSERT_WITH_METADATA_RPC_NAME: &str = "MultiUpsertWithMetadata";

// RemoveWithMetadata
pub const REMOVE_WITH_METADATA_RPC_NAME: &str = "RemoveWithMetadata";
pub const REMOVE_BY_TIMESTAMP_WITH_METADATA_RPC_NAME: &str = "RemoveByTimestampWithMetadata";
pub const STREAM_REMOVE_WITH_METADATA_RPC_NAME: &str = "StreamRemoveWithMetadata";
pub const MULTI_REMOVE_WITH_METADATA_RPC_NAME: &str = "MultiRemoveWithMetadata";

// SearchWithMetadata
pub const SEARCH_WITH_METADATA_RPC_NAME: &str = "SearchWithMetadata";
pub const SEARCH_BY_ID_WITH_METADATA_RPC_NAME: &str = "SearchByIDWithMetadata";
pub const STREAM_SEARCH_WITH_METADATA_RPC_NAME: &str = "StreamSearchWithMetadata";
pub const STREAM_SEARCH_BY_ID_WITH_METADATA_RPC_NAME: &str = "StreamSearchByIDWithMetadata";
pub const MULTI_SEARCH_WITH_METADATA_RPC_NAME: &str = "MultiSearchWithMetadata";
pub const MULTI_SEARCH_BY_ID_WITH_METADATA_RPC_NAME: &str = "MultiSearchByIDWithMetadata";
pub const LINEAR_SEARCH_WITH_METADATA_RPC_NAME: &str = "LinearSearchWithMetadata";
pub const LINEAR_SEARCH_BY_ID_WITH_METADATA_RPC_NAME: &str = "LinearSearchByIDWithMetadata";
pub const STREAM_LINEAR_SEARCH_WITH_METADATA_RPC_NAME: &str = "StreamLinearSearchWithMetadata";
pub const STREAM_LINEAR_SEARCH_BY_ID_WITH_METADATA_RPC_NAME: &str =
    "StreamLinearSearchByIDWithMetadata";
pub const MULTI_LINEAR_SEARCH_WITH_METADATA_RPC_NAME: &str = "MultiLinearSearchWithMetadata";
pub const MULTI_LINEAR_SEARCH_BY_ID_WITH_METADATA_RPC_NAME: &str =
    "MultiLinearSearchByIDWithMetadata";

// ObjectWithMetadata
pub const GET_OBJECT_WITH_METADATA_RPC_NAME: &str = "GetObjectWithMetadata";
pub const STREAM_GET_OBJECT_WITH_METADATA_RPC_NAME: &str = "StreamGetObjectWithMetadata";
pub const STREAM_LIST_OBJECT_WITH_METADATA_RPC_NAME: &str = "StreamListObjectWithMetadata";

/// How requests and responses flow over a single call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamingMode {
    /// One request, one response.
    Unary,
    /// One request, a stream of responses.
    ServerStreaming,
    /// A stream of requests, one response.
    ClientStreaming,
    /// Independent request and response streams over one call.
    Bidirectional,
}

impl StreamingMode {
    pub fn client_streaming(self) -> bool {
        matches!(self, StreamingMode::ClientStreaming | StreamingMode::Bidirectional)
    }

    pub fn server_streaming(self) -> bool {
        matches!(self, StreamingMode::ServerStreaming | StreamingMode::Bidirectional)
    }
}

impl fmt::Display for StreamingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamingMode::Unary => write!(f, "unary"),
            StreamingMode::ServerStreaming => write!(f, "server_streaming"),
            StreamingMode::ClientStreaming => write!(f, "client_streaming"),
            StreamingMode::Bidirectional => write!(f, "bidi_streaming"),
        }
    }
}

/// Static description of one RPC method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub package: &'static str,
    pub service: &'static str,
    pub method: &'static str,
    pub mode: StreamingMode,
}

impl MethodDescriptor {
    /// Fully-qualified service name, e.g. `vald.v1.Insert`.
    pub fn service_name(&self) -> String {
        format!("{}.{}", self.package, self.service)
    }

    /// Method path used on the wire, e.g. `/vald.v1.Insert/Insert`.
    pub fn path(&self) -> String {
        format!("/{}.{}/{}", self.package, self.service, self.method)
    }

    fn matches_path(&self, path: &str) -> bool {
        let Some(rest) = path.strip_prefix('/') else {
            return false;
        };
        let Some((service, method)) = rest.split_once('/') else {
            return false;
        };
        method == self.method
            && service
                .strip_prefix(self.package)
                .and_then(|s| s.strip_prefix('.'))
                == Some(self.service)
    }
}

const fn method(
    package: &'static str,
    service: &'static str,
    method: &'static str,
    mode: StreamingMode,
) -> MethodDescriptor {
    MethodDescriptor {
        package,
        service,
        method,
        mode,
    }
}

use StreamingMode::{Bidirectional as Bidi, ServerStreaming, Unary};

/// Every RPC method of the `vald.v1` and `meta.v1` packages.
pub static METHODS: &[MethodDescriptor] = &[
    // vald.v1.Insert
    method(PACKAGE_NAME, INSERT_RPC_SERVICE_NAME, INSERT_RPC_NAME, Unary),
    method(PACKAGE_NAME, INSERT_RPC_SERVICE_NAME, STREAM_INSERT_RPC_NAME, Bidi),
    method(PACKAGE_NAME, INSERT_RPC_SERVICE_NAME, MULTI_INSERT_RPC_NAME, Unary),
    // vald.v1.Update
    method(PACKAGE_NAME, UPDATE_RPC_SERVICE_NAME, UPDATE_RPC_NAME, Unary),
    method(PACKAGE_NAME, UPDATE_RPC_SERVICE_NAME, STREAM_UPDATE_RPC_NAME, Bidi),
    method(PACKAGE_NAME, UPDATE_RPC_SERVICE_NAME, MULTI_UPDATE_RPC_NAME, Unary),
    method(PACKAGE_NAME, UPDATE_RPC_SERVICE_NAME, UPDATE_TIMESTAMP_RPC_NAME, Unary),
    // vald.v1.Upsert
    method(PACKAGE_NAME, UPSERT_RPC_SERVICE_NAME, UPSERT_RPC_NAME, Unary),
    method(PACKAGE_NAME, UPSERT_RPC_SERVICE_NAME, STREAM_UPSERT_RPC_NAME, Bidi),
    method(PACKAGE_NAME, UPSERT_RPC_SERVICE_NAME, MULTI_UPSERT_RPC_NAME, Unary),
    // vald.v1.Remove
    method(PACKAGE_NAME, REMOVE_RPC_SERVICE_NAME, REMOVE_RPC_NAME, Unary),
    method(PACKAGE_NAME, REMOVE_RPC_SERVICE_NAME, REMOVE_BY_TIMESTAMP_RPC_NAME, Unary),
    method(PACKAGE_NAME, REMOVE_RPC_SERVICE_NAME, STREAM_REMOVE_RPC_NAME, Bidi),
    method(PACKAGE_NAME, REMOVE_RPC_SERVICE_NAME, MULTI_REMOVE_RPC_NAME, Unary),
    // vald.v1.Search
    method(PACKAGE_NAME, SEARCH_RPC_SERVICE_NAME, SEARCH_RPC_NAME, Unary),
    method(PACKAGE_NAME, SEARCH_RPC_SERVICE_NAME, SEARCH_BY_ID_RPC_NAME, Unary),
    method(PACKAGE_NAME, SEARCH_RPC_SERVICE_NAME, STREAM_SEARCH_RPC_NAME, Bidi),
    method(PACKAGE_NAME, SEARCH_RPC_SERVICE_NAME, STREAM_SEARCH_BY_ID_RPC_NAME, Bidi),
    method(PACKAGE_NAME, SEARCH_RPC_SERVICE_NAME, MULTI_SEARCH_RPC_NAME, Unary),
    method(PACKAGE_NAME, SEARCH_RPC_SERVICE_NAME, MULTI_SEARCH_BY_ID_RPC_NAME, Unary),
    method(PACKAGE_NAME, SEARCH_RPC_SERVICE_NAME, LINEAR_SEARCH_RPC_NAME, Unary),
    method(PACKAGE_NAME, SEARCH_RPC_SERVICE_NAME, LINEAR_SEARCH_BY_ID_RPC_NAME, Unary),
    method(PACKAGE_NAME, SEARCH_RPC_SERVICE_NAME, STREAM_LINEAR_SEARCH_RPC_NAME, Bidi),
    method(PACKAGE_NAME, SEARCH_RPC_SERVICE_NAME, STREAM_LINEAR_SEARCH_BY_ID_RPC_NAME, Bidi),
    method(PACKAGE_NAME, SEARCH_RPC_SERVICE_NAME, MULTI_LINEAR_SEARCH_RPC_NAME, Unary),
    method(PACKAGE_NAME, SEARCH_RPC_SERVICE_NAME, MULTI_LINEAR_SEARCH_BY_ID_RPC_NAME, Unary),
    // vald.v1.Object
    method(PACKAGE_NAME, OBJECT_RPC_SERVICE_NAME, EXISTS_RPC_NAME, Unary),
    method(PACKAGE_NAME, OBJECT_RPC_SERVICE_NAME, GET_OBJECT_RPC_NAME, Unary),
    method(PACKAGE_NAME, OBJECT_RPC_SERVICE_NAME, STREAM_GET_OBJECT_RPC_NAME, Bidi),
    method(PACKAGE_NAME, OBJECT_RPC_SERVICE_NAME, STREAM_LIST_OBJECT_RPC_NAME, ServerStreaming),
    method(PACKAGE_NAME, OBJECT_RPC_SERVICE_NAME, GET_TIMESTAMP_RPC_NAME, Unary),
    // vald.v1.Index
    method(PACKAGE_NAME, INDEX_RPC_SERVICE_NAME, INDEX_INFO_RPC_NAME, Unary),
    method(PACKAGE_NAME, INDEX_RPC_SERVICE_NAME, INDEX_DETAIL_RPC_NAME, Unary),
    method(PACKAGE_NAME, INDEX_RPC_SERVICE_NAME, INDEX_STATISTICS_RPC_NAME, Unary),
    method(PACKAGE_NAME, INDEX_RPC_SERVICE_NAME, INDEX_STATISTICS_DETAIL_RPC_NAME, Unary),
    method(PACKAGE_NAME, INDEX_RPC_SERVICE_NAME, INDEX_PROPERTY_RPC_NAME, Unary),
    // vald.v1.Flush
    method(PACKAGE_NAME, FLUSH_RPC_SERVICE_NAME, FLUSH_RPC_NAME, Unary),
    // vald.v1.Filter
    method(PACKAGE_NAME, FILTER_RPC_SERVICE_NAME, SEARCH_OBJECT_RPC_NAME, Unary),
    method(PACKAGE_NAME, FILTER_RPC_SERVICE_NAME, MULTI_SEARCH_OBJECT_RPC_NAME, Unary),
    method(PACKAGE_NAME, FILTER_RPC_SERVICE_NAME, STREAM_SEARCH_OBJECT_RPC_NAME, Bidi),
    method(PACKAGE_NAME, FILTER_RPC_SERVICE_NAME, INSERT_OBJECT_RPC_NAME, Unary),
    method(PACKAGE_NAME, FILTER_RPC_SERVICE_NAME, STREAM_INSERT_OBJECT_RPC_NAME, Bidi),
    method(PACKAGE_NAME, FILTER_RPC_SERVICE_NAME, MULTI_INSERT_OBJECT_RPC_NAME, Unary),
    method(PACKAGE_NAME, FILTER_RPC_SERVICE_NAME, UPDATE_OBJECT_RPC_NAME, Unary),
    method(PACKAGE_NAME, FILTER_RPC_SERVICE_NAME, STREAM_UPDATE_OBJECT_RPC_NAME, Bidi),
    method(PACKAGE_NAME, FILTER_RPC_SERVICE_NAME, MULTI_UPDATE_OBJECT_RPC_NAME, Unary),
    method(PACKAGE_NAME, FILTER_RPC_SERVICE_NAME, UPSERT_OBJECT_RPC_NAME, Unary),
    method(PACKAGE_NAME, FILTER_RPC_SERVICE_NAME, STREAM_UPSERT_OBJECT_RPC_NAME, Bidi),
    method(PACKAGE_NAME, FILTER_RPC_SERVICE_NAME, MULTI_UPSERT_OBJECT_RPC_NAME, Unary),
    // meta.v1.InsertWithMetadata
    method(
        META_PACKAGE_NAME,
        INSERT_WITH_METADATA_RPC_SERVICE_NAME,
        INSERT_WITH_METADATA_RPC_NAME,
        Unary,
    ),
    method(
        META_PACKAGE_NAME,
        INSERT_WITH_METADATA_RPC_SERVICE_NAME,
        STREAM_INSERT_WITH_METADATA_RPC_NAME,
        Bidi,
    ),
    method(
        META_PACKAGE_NAME,
        INSERT_WITH_METADATA_RPC_SERVICE_NAME,
        MULTI_INSERT_WITH_METADATA_RPC_NAME,
        Unary,
    ),
    // meta.v1.UpdateWithMetadata
    method(
        META_PACKAGE_NAME,
        UPDATE_WITH_METADATA_RPC_SERVICE_NAME,
        UPDATE_WITH_METADATA_RPC_NAME,
        Unary,
    ),
    method(
        META_PACKAGE_NAME,
        UPDATE_WITH_METADATA_RPC_SERVICE_NAME,
        STREAM_UPDATE_WITH_METADATA_RPC_NAME,
        Bidi,
    ),
    method(
        META_PACKAGE_NAME,
        UPDATE_WITH_METADATA_RPC_SERVICE_NAME,
        MULTI_UPDATE_WITH_METADATA_RPC_NAME,
        Unary,
    ),
    method(
        META_PACKAGE_NAME,
        UPDATE_WITH_METADATA_RPC_SERVICE_NAME,
        UPDATE_TIMESTAMP_WITH_METADATA_RPC_NAME,
        Unary,
    ),
    // meta.v1.UpsertWithMetadata
    method(
        META_PACKAGE_NAME,
        UPSERT_WITH_METADATA_RPC_SERVICE_NAME,
        UPSERT_WITH_METADATA_RPC_NAME,
        Unary,
    ),
    method(
        META_PACKAGE_NAME,
        UPSERT_WITH_METADATA_RPC_SERVICE_NAME,
        STREAM_UPSERT_WITH_METADATA_RPC_NAME,
        Bidi,
    ),
    method(
        META_PACKAGE_NAME,
        UPSERT_WITH_METADATA_RPC_SERVICE_NAME,
        MULTI_UPSERT_WITH_METADATA_RPC_NAME,
        Unary,
    ),
    // meta.v1.RemoveWithMetadata
    method(
        META_PACKAGE_NAME,
        REMOVE_WITH_METADATA_RPC_SERVICE_NAME,
        REMOVE_WITH_METADATA_RPC_NAME,
        Unary,
    ),
    method(
        META_PACKAGE_NAME,
        REMOVE_WITH_METADATA_RPC_SERVICE_NAME,
        REMOVE_BY_TIMESTAMP_WITH_METADATA_RPC_NAME,
        Unary,
    ),
    method(
        META_PACKAGE_NAME,
        REMOVE_WITH_METADATA_RPC_SERVICE_NAME,
        STREAM_REMOVE_WITH_METADATA_RPC_NAME,
        Bidi,
    ),
    method(
        META_PACKAGE_NAME,
        REMOVE_WITH_METADATA_RPC_SERVICE_NAME,
        MULTI_REMOVE_WITH_METADATA_RPC_NAME,
        Unary,
    ),
    // meta.v1.SearchWithMetadata
    method(
        META_PACKAGE_NAME,
        SEARCH_WITH_METADATA_RPC_SERVICE_NAME,
        SEARCH_WITH_METADATA_RPC_NAME,
        Unary,
    ),
    method(
        META_PACKAGE_NAME,
        SEARCH_WITH_METADATA_RPC_SERVICE_NAME,
        SEARCH_BY_ID_WITH_METADATA_RPC_NAME,
        Unary,
    ),
    method(
        META_PACKAGE_NAME,
        SEARCH_WITH_METADATA_RPC_SERVICE_NAME,
        STREAM_SEARCH_WITH_METADATA_RPC_NAME,
        Bidi,
    ),
    method(
        META_PACKAGE_NAME,
        SEARCH_WITH_METADATA_RPC_SERVICE_NAME,
        STREAM_SEARCH_BY_ID_WITH_METADATA_RPC_NAME,
        Bidi,
    ),
    method(
        META_PACKAGE_NAME,
        SEARCH_WITH_METADATA_RPC_SERVICE_NAME,
        MULTI_SEARCH_WITH_METADATA_RPC_NAME,
        Unary,
    ),
    method(
        META_PACKAGE_NAME,
        SEARCH_WITH_METADATA_RPC_SERVICE_NAME,
        MULTI_SEARCH_BY_ID_WITH_METADATA_RPC_NAME,
        Unary,
    ),
    method(
        META_PACKAGE_NAME,
        SEARCH_WITH_METADATA_RPC_SERVICE_NAME,
        LINEAR_SEARCH_WITH_METADATA_RPC_NAME,
        Unary,
    ),
    method(
        META_PACKAGE_NAME,
        SEARCH_WITH_METADATA_RPC_SERVICE_NAME,
        LINEAR_SEARCH_BY_ID_WITH_METADATA_RPC_NAME,
        Unary,
    ),
    method(
        META_PACKAGE_NAME,
        SEARCH_WITH_METADATA_RPC_SERVICE_NAME,
        STREAM_LINEAR_SEARCH_WITH_METADATA_RPC_NAME,
        Bidi,
    ),
    method(
        META_PACKAGE_NAME,
        SEARCH_WITH_METADATA_RPC_SERVICE_NAME,
        STREAM_LINEAR_SEARCH_BY_ID_WITH_METADATA_RPC_NAME,
        Bidi,
    ),
    method(
        META_PACKAGE_NAME,
        SEARCH_WITH_METADATA_RPC_SERVICE_NAME,
        MULTI_LINEAR_SEARCH_WITH_METADATA_RPC_NAME,
        Unary,
    ),
    method(
        META_PACKAGE_NAME,
        SEARCH_WITH_METADATA_RPC_SERVICE_NAME,
        MULTI_LINEAR_SEARCH_BY_ID_WITH_METADATA_RPC_NAME,
        Unary,
    ),
    // meta.v1.ObjectWithMetadata
    method(
        META_PACKAGE_NAME,
        OBJECT_WITH_METADATA_RPC_SERVICE_NAME,
        GET_OBJECT_WITH_METADATA_RPC_NAME,
        Unary,
    ),
    method(
        META_PACKAGE_NAME,
        OBJECT_WITH_METADATA_RPC_SERVICE_NAME,
        STREAM_GET_OBJECT_WITH_METADATA_RPC_NAME,
        Bidi,
    ),
    method(
        META_PACKAGE_NAME,
        OBJECT_WITH_METADATA_RPC_SERVICE_NAME,
        STREAM_LIST_OBJECT_WITH_METADATA_RPC_NAME,
        ServerStreaming,
    ),
];

/// Find a method by its wire path, e.g. `/vald.v1.Remove/Remove`.
pub fn lookup(path: &str) -> Option<&'static MethodDescriptor> {
    METHODS.iter().find(|m| m.matches_path(path))
}

/// All methods of one service, in declaration order.
pub fn service_methods<'a>(
    package: &'a str,
    service: &'a str,
) -> impl Iterator<Item = &'static MethodDescriptor> + 'a {
    METHODS
        .iter()
        .filter(move |m| m.package == package && m.service == service)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn paths_follow_package_service_method() {
        let remove = lookup("/vald.v1.Remove/Remove").unwrap();
        assert_eq!(remove.path(), "/vald.v1.Remove/Remove");
        assert_eq!(remove.mode, StreamingMode::Unary);

        let search = lookup("/meta.v1.SearchWithMetadata/SearchWithMetadata").unwrap();
        assert_eq!(search.service_name(), "meta.v1.SearchWithMetadata");

        for m in METHODS {
            assert_eq!(m.path(), format!("/{}.{}/{}", m.package, m.service, m.method));
            assert_eq!(lookup(&m.path()), Some(m));
        }
    }

    #[test]
    fn paths_are_unique() {
        let paths: HashSet<String> = METHODS.iter().map(|m| m.path()).collect();
        assert_eq!(paths.len(), METHODS.len());
    }

    #[test]
    fn lookup_rejects_malformed_paths() {
        assert!(lookup("vald.v1.Insert/Insert").is_none());
        assert!(lookup("/vald.v1.Insert").is_none());
        assert!(lookup("/vald.v1Insert/Insert").is_none());
        assert!(lookup("/vald.v1.Insert/Nope").is_none());
        assert!(lookup("/meta.v1.Insert/Insert").is_none());
    }

    #[test]
    fn streaming_methods_are_prefixed_with_stream() {
        for m in METHODS {
            assert_eq!(
                m.method.starts_with("Stream"),
                m.mode != StreamingMode::Unary,
                "{}",
                m.path()
            );
        }
    }

    #[test]
    fn list_methods_are_server_streaming_only() {
        let server_streaming: Vec<&str> = METHODS
            .iter()
            .filter(|m| m.mode == StreamingMode::ServerStreaming)
            .map(|m| m.method)
            .collect();
        assert_eq!(
            server_streaming,
            vec![STREAM_LIST_OBJECT_RPC_NAME, STREAM_LIST_OBJECT_WITH_METADATA_RPC_NAME]
        );
        assert!(!StreamingMode::ServerStreaming.client_streaming());
        assert!(StreamingMode::ServerStreaming.server_streaming());
        assert!(StreamingMode::Bidirectional.client_streaming());
        assert!(METHODS.iter().all(|m| m.mode != StreamingMode::ClientStreaming));
    }

    #[test]
    fn service_method_counts() {
        let count = |p, s| service_methods(p, s).count();
        assert_eq!(count(PACKAGE_NAME, INSERT_RPC_SERVICE_NAME), 3);
        assert_eq!(count(PACKAGE_NAME, UPDATE_RPC_SERVICE_NAME), 4);
        assert_eq!(count(PACKAGE_NAME, UPSERT_RPC_SERVICE_NAME), 3);
        assert_eq!(count(PACKAGE_NAME, REMOVE_RPC_SERVICE_NAME), 4);
        assert_eq!(count(PACKAGE_NAME, SEARCH_RPC_SERVICE_NAME), 12);
        assert_eq!(count(PACKAGE_NAME, OBJECT_RPC_SERVICE_NAME), 5);
        assert_eq!(count(PACKAGE_NAME, INDEX_RPC_SERVICE_NAME), 5);
        assert_eq!(count(PACKAGE_NAME, FLUSH_RPC_SERVICE_NAME), 1);
        assert_eq!(count(PACKAGE_NAME, FILTER_RPC_SERVICE_NAME), 12);
        assert_eq!(count(META_PACKAGE_NAME, SEARCH_WITH_METADATA_RPC_SERVICE_NAME), 12);
        assert_eq!(count(META_PACKAGE_NAME, OBJECT_WITH_METADATA_RPC_SERVICE_NAME), 3);
        assert_eq!(count(META_PACKAGE_NAME, REMOVE_WITH_METADATA_RPC_SERVICE_NAME), 4);
    }
}
