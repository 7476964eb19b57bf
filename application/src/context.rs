//! [`Context`]-related definitions.

use std::sync::{
    atomic::{self, AtomicU16},
    Arc,
};

use axum::{async_trait, extract::FromRequestParts, RequestPartsExt as _};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use derive_more::Debug;
use juniper::{
    http::{GraphQLBatchResponse, GraphQLResponse},
    IntoFieldError as _,
};
use serde::Deserialize;
use service::domain::case;
use tokio::sync::OnceCell;
use uuid::Uuid;

#[cfg(doc)]
use crate::api::Case;
use crate::{define_error, AsError as _, Error, JuniperResponse, Service};

/// Application context.
#[derive(Debug)]
pub struct Context {
    /// [`Service`] instance.
    service: Service,

    /// Verification material for identity tokens.
    auth: Auth,

    /// Error status code.
    error_status_code: AtomicU16,

    /// Parts of the HTTP request.
    parts: http::request::Parts,

    /// [`Identity`] of the current operator, once resolved.
    identity: OnceCell<Option<Identity>>,
}

impl Context {
    /// Returns [`Service`] instance of this [`Context`].
    #[must_use]
    pub fn service(&self) -> &Service {
        &self.service
    }

    /// Returns the error status code of this [`Context`].
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn error_status_code(&self) -> http::StatusCode {
        http::StatusCode::from_u16(
            self.error_status_code.load(atomic::Ordering::Relaxed),
        )
        .expect("invalid status code")
    }

    /// Sets the error status code for this [`Context`].
    ///
    /// Provided [`http::StatusCode`] will be applied to the response.
    pub fn set_error_status_code(&self, status_code: http::StatusCode) {
        self.error_status_code
            .store(status_code.as_u16(), atomic::Ordering::Relaxed);
    }

    /// Helper method calling [`Context::set_error_status_code()`] inside
    /// [`Result::map_err()`] closure.
    pub fn error(&self) -> impl FnOnce(Error) -> Error + '_ {
        move |err| {
            self.set_error_status_code(err.status_code);
            err
        }
    }

    /// Returns the [`Identity`] of the current operator, if the request
    /// carries one.
    ///
    /// Requests without an `Authorization` header are served anonymously:
    /// the [`Identity`] is only used to stamp ownership fields (e.g.
    /// [`Case`] creation), never to gate access.
    ///
    /// # Errors
    ///
    /// Errors if the provided identity token is present but invalid.
    pub async fn identity(&self) -> Result<Option<Identity>, Error> {
        self.identity
            .get_or_try_init(|| async {
                let res = self
                    .parts
                    .clone()
                    .extract::<TypedHeader<Authorization<Bearer>>>()
                    .await;
                match res {
                    Ok(TypedHeader(Authorization(bearer))) => {
                        self.auth.verify(bearer.token()).map(Some)
                    }
                    Err(e) => {
                        if e.is_missing() {
                            Ok(None)
                        } else {
                            Err(e.into_error())
                        }
                    }
                }
                .map_err(self.error())
            })
            .await
            .copied()
    }

    /// Applies the [`juniper::Variables`] provided by the client on GraphQL
    /// subscription initialization.
    ///
    /// # Errors
    ///
    /// Errors if the provided variables are invalid.
    pub(crate) fn apply_subscription_variables(
        &mut self,
        vars: &juniper::Variables,
    ) -> Result<(), Error> {
        if let Some(token) = vars.get("authToken") {
            let token = token
                .as_string_value()
                .ok_or_else(|| Error::from(AuthError::InvalidVariables))?;
            let token = format!("Bearer {token}")
                .parse()
                .map_err(|_| Error::from(AuthError::InvalidVariables))?;
            drop(
                self.parts
                    .headers
                    .insert(http::header::AUTHORIZATION, token),
            );
        }

        Ok(())
    }
}

impl juniper::Context for Context {}

#[async_trait]
impl<S> FromRequestParts<S> for Context
where
    S: Send + Sync,
{
    type Rejection = JuniperResponse;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _: &S,
    ) -> Result<Self, Self::Rejection> {
        /// Builds a [`JuniperResponse`] reporting a missing extension.
        fn missing_extension(what: &str) -> JuniperResponse {
            JuniperResponse {
                status_code: http::StatusCode::INTERNAL_SERVER_ERROR,
                response: GraphQLBatchResponse::Single(GraphQLResponse::error(
                    Error::internal(&format!("missing `{what}` extension"))
                        .into_field_error(),
                )),
            }
        }

        let service = parts
            .extensions
            .get::<Service>()
            .cloned()
            .ok_or_else(|| missing_extension("Service"))?;
        let auth = parts
            .extensions
            .get::<Auth>()
            .cloned()
            .ok_or_else(|| missing_extension("Auth"))?;

        Ok(Self {
            service,
            auth,
            error_status_code: AtomicU16::new(
                http::StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            ),
            parts: parts.clone(),
            identity: OnceCell::new(),
        })
    }
}

/// Identity of the operator issuing the current request.
///
/// Issued by the external authentication provider; this application only
/// verifies the token and stamps the carried ID onto ownership fields.
#[derive(Clone, Copy, Debug)]
pub struct Identity {
    /// ID the authentication provider knows the operator by.
    pub operator_id: case::OwnerId,
}

/// Verification material for the operator identity tokens.
#[derive(Clone, Debug)]
pub struct Auth {
    /// [JWT] decoding key of the external authentication provider.
    ///
    /// [JWT]: https://datatracker.ietf.org/doc/html/rfc7519
    #[debug(skip)]
    decoding_key: Arc<jsonwebtoken::DecodingKey>,
}

impl Auth {
    /// Creates a new [`Auth`] verifying tokens with the provided secret.
    #[must_use]
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            decoding_key: Arc::new(jsonwebtoken::DecodingKey::from_secret(
                secret.as_ref(),
            )),
        }
    }

    /// Verifies the provided identity token, returning the [`Identity`]
    /// it carries.
    ///
    /// # Errors
    ///
    /// Errors if the token is malformed, expired, or signed with a wrong
    /// key.
    fn verify(&self, token: &str) -> Result<Identity, Error> {
        /// Claims of an operator identity token.
        #[derive(Debug, Deserialize)]
        struct Claims {
            /// Subject the token was issued for.
            sub: Uuid,
        }

        jsonwebtoken::decode::<Claims>(
            token,
            &self.decoding_key,
            &jsonwebtoken::Validation::default(),
        )
        .map(|data| Identity {
            operator_id: data.claims.sub.into(),
        })
        .map_err(|_| AuthError::InvalidToken.into())
    }
}

define_error! {
    enum AuthError {
        #[code = "INVALID_AUTHORIZATION"]
        #[status = UNAUTHORIZED]
        #[message = "Invalid authorization token"]
        InvalidToken,

        #[code = "INVALID_VARIABLES"]
        #[status = BAD_REQUEST]
        #[message = "Invalid subscription authorization variables"]
        InvalidVariables,
    }
}
