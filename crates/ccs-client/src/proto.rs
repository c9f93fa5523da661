//! Protobuf messages and unary client for `ccs.v1.CacheService`.
//!
//! Mirrors `proto/ccs/v1/cache.proto`. The messages are declared with the
//! `prost` derive directly so building the crate does not require `protoc`.

use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::Channel;

/// Fetches one entry.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetRequest {
    #[prost(string, tag = "1")]
    pub cache: String,
    #[prost(string, tag = "2")]
    pub key: String,
}

/// Stores one entry unconditionally.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PutRequest {
    #[prost(string, tag = "1")]
    pub cache: String,
    #[prost(string, tag = "2")]
    pub key: String,
    #[prost(bytes = "vec", tag = "3")]
    pub value: Vec<u8>,
    #[prost(bool, tag = "4")]
    pub return_old_value: bool,
}

/// Stores one entry if the key is already mapped.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ReplaceRequest {
    #[prost(string, tag = "1")]
    pub cache: String,
    #[prost(string, tag = "2")]
    pub key: String,
    #[prost(bytes = "vec", tag = "3")]
    pub value: Vec<u8>,
}

/// Removes one entry.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RemoveRequest {
    #[prost(string, tag = "1")]
    pub cache: String,
    #[prost(string, tag = "2")]
    pub key: String,
    #[prost(bool, tag = "3")]
    pub return_old_value: bool,
}

/// Result of every operation.
///
/// `present` reports whether the key was mapped before the call; `value`
/// carries the current (get) or displaced (put/replace/remove) value.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ValueResponse {
    #[prost(bool, tag = "1")]
    pub present: bool,
    #[prost(bytes = "vec", optional, tag = "2")]
    pub value: Option<Vec<u8>>,
}

/// Unary client for `ccs.v1.CacheService`.
#[derive(Debug, Clone)]
pub struct CacheServiceClient {
    inner: tonic::client::Grpc<Channel>,
}

impl CacheServiceClient {
    /// Creates a client on an established channel.
    #[must_use]
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: tonic::client::Grpc::new(channel),
        }
    }

    pub async fn get(&mut self, request: GetRequest) -> Result<tonic::Response<ValueResponse>, tonic::Status> {
        self.unary(request, "/ccs.v1.CacheService/Get").await
    }

    pub async fn put(&mut self, request: PutRequest) -> Result<tonic::Response<ValueResponse>, tonic::Status> {
        self.unary(request, "/ccs.v1.CacheService/Put").await
    }

    pub async fn replace(&mut self, request: ReplaceRequest) -> Result<tonic::Response<ValueResponse>, tonic::Status> {
        self.unary(request, "/ccs.v1.CacheService/Replace").await
    }

    pub async fn remove(&mut self, request: RemoveRequest) -> Result<tonic::Response<ValueResponse>, tonic::Status> {
        self.unary(request, "/ccs.v1.CacheService/Remove").await
    }

    async fn unary<Req, Resp>(
        &mut self,
        request: Req,
        path: &'static str,
    ) -> Result<tonic::Response<Resp>, tonic::Status>
    where
        Req: ::prost::Message + Send + Sync + 'static,
        Resp: ::prost::Message + Default + Send + Sync + 'static,
    {
        self.inner
            .ready()
            .await
            .map_err(|e| tonic::Status::unknown(format!("Service was not ready: {}", e)))?;
        let codec: ProstCodec<Req, Resp> = ProstCodec::default();
        self.inner
            .unary(tonic::Request::new(request), PathAndQuery::from_static(path), codec)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_value_response_absent_value_decodes_as_none() {
        let bytes = ValueResponse { present: false, value: None }.encode_to_vec();
        let decoded = ValueResponse::decode(bytes.as_slice()).unwrap();
        assert!(!decoded.present);
        assert!(decoded.value.is_none());
    }

    #[test]
    fn test_empty_value_is_distinct_from_absent() {
        let bytes = ValueResponse { present: true, value: Some(Vec::new()) }.encode_to_vec();
        let decoded = ValueResponse::decode(bytes.as_slice()).unwrap();
        assert_eq!(decoded.value, Some(Vec::new()));
    }
}
