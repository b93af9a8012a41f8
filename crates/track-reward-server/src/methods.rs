//! Method handlers for the scoring service

use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use track_reward_core::{
    RewardConfig, RewardError, RewardFunction, StepObservation, error_codes,
};

use crate::registry::{EvaluatorRegistry, StreamId};
use crate::rpc::{Request, Response};

/// Method names understood by the service
pub const METHODS: &[&str] = &[
    "open_stream",
    "evaluate",
    "reset_stream",
    "close_stream",
    "list_streams",
    "get_config",
];

/// Parameters for open_stream
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OpenStreamParams {
    pub stream_id: StreamId,
    /// Overrides the server default config for this stream
    #[serde(default)]
    pub config: Option<RewardConfig>,
}

/// Parameters for evaluate
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EvaluateParams {
    pub stream_id: StreamId,
    /// Simulator parameter mapping, validated separately so shape errors
    /// surface as invalid observations
    pub observation: serde_json::Value,
}

/// Parameters naming a single stream
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StreamParams {
    pub stream_id: StreamId,
}

/// Parameters for get_config
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetConfigParams {
    #[serde(default)]
    pub stream_id: Option<StreamId>,
}

/// Dispatch a request to its handler
pub async fn handle_request(
    request: &Request,
    registry: &Arc<RwLock<EvaluatorRegistry>>,
    default_config: &RewardConfig,
) -> Response {
    let id = request.id.clone();
    let params = request.params.clone();

    let result = match request.method.as_str() {
        "open_stream" => open_stream(params, registry, default_config).await,
        "evaluate" => evaluate(params, registry).await,
        "reset_stream" => reset_stream(params, registry).await,
        "close_stream" => close_stream(params, registry).await,
        "list_streams" => list_streams(registry).await,
        "get_config" => get_config(params, registry, default_config).await,
        _ => {
            return Response::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!(
                    "Method not found: {} (expected one of: {})",
                    request.method,
                    METHODS.join(", ")
                ),
            );
        }
    };

    match result {
        Ok(value) => Response::success(id, value),
        Err(e) => {
            debug!("{} failed: {}", request.method, e);
            Response::from_error(id, &e)
        }
    }
}

fn parse_params<T: for<'de> Deserialize<'de>>(params: serde_json::Value) -> Result<T, RewardError> {
    serde_json::from_value(params)
        .map_err(|e| RewardError::ProtocolError(format!("Invalid params: {}", e)))
}

async fn open_stream(
    params: serde_json::Value,
    registry: &Arc<RwLock<EvaluatorRegistry>>,
    default_config: &RewardConfig,
) -> Result<serde_json::Value, RewardError> {
    let params: OpenStreamParams = parse_params(params)?;
    let config = params.config.unwrap_or_else(|| default_config.clone());

    let mut reg = registry.write().await;
    let created = reg.open(params.stream_id.clone(), config)?;
    if created {
        info!("Opened stream {}", params.stream_id);
    }

    let components = reg
        .get(&params.stream_id)
        .map(|entry| entry.evaluator().components())
        .unwrap_or_default();

    Ok(serde_json::json!({
        "StreamId": params.stream_id,
        "Created": created,
        "Components": components,
    }))
}

async fn evaluate(
    params: serde_json::Value,
    registry: &Arc<RwLock<EvaluatorRegistry>>,
) -> Result<serde_json::Value, RewardError> {
    let params: EvaluateParams = parse_params(params)?;
    let observation = StepObservation::from_value(params.observation)?;

    let mut reg = registry.write().await;
    let reward = reg.evaluate(&params.stream_id, &observation)?;
    let episode = reg
        .summary(&params.stream_id)
        .map(|s| s.episodes)
        .unwrap_or_default();

    Ok(serde_json::json!({
        "Reward": reward.value,
        "Components": reward.components,
        "Gate": reward.gate,
        "Steps": observation.steps,
        "Episode": episode,
    }))
}

async fn reset_stream(
    params: serde_json::Value,
    registry: &Arc<RwLock<EvaluatorRegistry>>,
) -> Result<serde_json::Value, RewardError> {
    let params: StreamParams = parse_params(params)?;
    registry.write().await.reset(&params.stream_id)?;
    debug!("Reset stream {}", params.stream_id);
    Ok(serde_json::json!({}))
}

async fn close_stream(
    params: serde_json::Value,
    registry: &Arc<RwLock<EvaluatorRegistry>>,
) -> Result<serde_json::Value, RewardError> {
    let params: StreamParams = parse_params(params)?;
    let summary = registry.write().await.close(&params.stream_id)?;
    info!(
        "Closed stream {} after {} steps (total reward {:.3})",
        summary.stream_id, summary.steps_scored, summary.total_reward
    );
    Ok(serde_json::to_value(summary)?)
}

async fn list_streams(
    registry: &Arc<RwLock<EvaluatorRegistry>>,
) -> Result<serde_json::Value, RewardError> {
    let reg = registry.read().await;
    Ok(serde_json::json!({
        "Streams": reg.list(),
        "AvailableSlots": reg.available_slots(),
    }))
}

async fn get_config(
    params: serde_json::Value,
    registry: &Arc<RwLock<EvaluatorRegistry>>,
    default_config: &RewardConfig,
) -> Result<serde_json::Value, RewardError> {
    let params: GetConfigParams = if params.is_null() {
        GetConfigParams::default()
    } else {
        parse_params(params)?
    };

    match params.stream_id {
        Some(stream_id) => {
            let reg = registry.read().await;
            let entry = reg
                .get(&stream_id)
                .ok_or_else(|| RewardError::StreamNotFound(stream_id.clone()))?;
            Ok(serde_json::to_value(entry.evaluator().config())?)
        }
        None => Ok(serde_json::to_value(default_config)?),
    }
}
