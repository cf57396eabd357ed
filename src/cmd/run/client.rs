use rama::{
    Layer as _, Service as _,
    error::extra::OpaqueError,
    http::{
        HeaderValue, Request, Response,
        client::EasyHttpWebClient,
        layer::{
            map_request_body::MapRequestBodyLayer, map_response_body::MapResponseBodyLayer,
            required_header::AddRequiredRequestHeadersLayer,
        },
    },
    layer::MapErrLayer,
    service::BoxService,
};

use crate::utils::env;

/// HTTP client shared by all probe tasks.
///
/// A probe is sent exactly once: no retry and no timeout middleware,
/// so a hung remote keeps its probe task outstanding.
pub(crate) fn http_client() -> BoxService<Request, Response, OpaqueError> {
    let client_middleware = (
        MapResponseBodyLayer::new_boxed_streaming_body(),
        MapErrLayer::into_opaque_error(),
        AddRequiredRequestHeadersLayer::new()
            .with_user_agent_header_value(HeaderValue::from_static(env::project_name())),
        MapRequestBodyLayer::new_boxed_streaming_body(),
    );

    client_middleware
        .into_layer(EasyHttpWebClient::default())
        .boxed()
}
