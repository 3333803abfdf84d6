use crate::{
    client::{ClientError, SocialApi},
    config::ConnectionConfig,
    flat::FlatSocialApi,
    init_once::InitOnce,
};
use std::{
    any::{Any, TypeId},
    collections::HashMap,
    sync::{Arc, LazyLock, Mutex, PoisonError},
};
use thiserror::Error;
use tracing::{error, info};

/// Opens the transport connections and hands back a ready client.
pub trait Connector: Send + Sync + 'static {
    type Api: SocialApi + 'static;

    fn connect(
        &self,
        config: &ConnectionConfig,
    ) -> impl Future<Output = Result<Self::Api, ClientError>> + Send;
}

/// A failed connection attempt, shared by every caller that waited on it.
#[derive(Clone, Debug, Error)]
#[error(transparent)]
pub struct ConnectError(Arc<ClientError>);

impl ConnectError {
    #[must_use]
    pub fn get(&self) -> &ClientError {
        &self.0
    }
}

impl From<ClientError> for ConnectError {
    fn from(value: ClientError) -> Self {
        Self(Arc::new(value))
    }
}

/// Owner of one base client and the flat client built on top of it, both created on first
/// use. [`process_connection_resolver`] hands out the process-wide instance.
pub struct ConnectionResolver<C: Connector> {
    connector: Arc<C>,
    config: Arc<ConnectionConfig>,
    api: InitOnce<C::Api, ConnectError>,
    flat_api: InitOnce<FlatSocialApi<C::Api>, ConnectError>,
}

#[must_use]
pub fn create_connection_resolver<C: Connector>(
    connector: C,
    config: ConnectionConfig,
) -> ConnectionResolver<C> {
    ConnectionResolver {
        connector: Arc::new(connector),
        config: Arc::new(config),
        api: InitOnce::new(),
        flat_api: InitOnce::new(),
    }
}

type AnyResolver = Arc<dyn Any + Send + Sync>;

/// Resolvers shared by the whole process, one per connector type.
static PROCESS_RESOLVERS: LazyLock<Mutex<HashMap<TypeId, AnyResolver>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// The process-wide resolver for connector type `C`.
///
/// `init` only runs for the first caller. Later callers get the same resolver and
/// therefore the same connection, whatever connector and config they would have built.
pub fn process_connection_resolver<C: Connector>(
    init: impl FnOnce() -> (C, ConnectionConfig),
) -> Arc<ConnectionResolver<C>> {
    let mut resolvers = PROCESS_RESOLVERS
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    let existing = resolvers
        .get(&TypeId::of::<C>())
        .cloned()
        .and_then(|resolver| resolver.downcast::<ConnectionResolver<C>>().ok());
    if let Some(resolver) = existing {
        return resolver;
    }

    let (connector, config) = init();
    info!(
        connector = std::any::type_name::<C>(),
        "Creating process connection resolver"
    );
    let resolver = Arc::new(create_connection_resolver(connector, config));
    resolvers.insert(TypeId::of::<C>(), Arc::clone(&resolver) as AnyResolver);
    resolver
}

impl<C: Connector> ConnectionResolver<C> {
    #[must_use]
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    pub async fn resolve_connection(&self) -> Result<Arc<C::Api>, ConnectError> {
        let connector = Arc::clone(&self.connector);
        let config = Arc::clone(&self.config);

        self.api
            .get_or_try_init(move || async move {
                info!(
                    substrate_node_url = %config.substrate_node_url,
                    ipfs_node_url = %config.ipfs_node_url,
                    "Connecting social api"
                );

                match connector.connect(&config).await {
                    Ok(api) => {
                        info!("Social api connected");
                        Ok(api)
                    }
                    Err(e) => {
                        error!(error = %e, "Error connecting social api");
                        Err(e.into())
                    }
                }
            })
            .await
    }

    pub async fn resolve_flat_connection(
        &self,
    ) -> Result<Arc<FlatSocialApi<C::Api>>, ConnectError> {
        if let Some(flat_api) = self.flat_api.get() {
            return Ok(flat_api);
        }

        let api = self.resolve_connection().await?;
        self.flat_api
            .get_or_try_init(move || async move { Ok(FlatSocialApi::new(api)) })
            .await
    }
}
