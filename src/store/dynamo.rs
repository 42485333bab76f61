//! DynamoDB Item Store
//!
//! Scans a DynamoDB table through `aws-sdk-dynamodb`. Credentials come from
//! the SDK's default provider chain.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::scan::ScanError;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde_json::{Map, Number, Value};
use tracing::{debug, warn};

use crate::store::{
    ContinuationToken, Item, ItemStore, Page, ScanExpression, ScanRequest, StoreError, StoreResult,
};

// == Dynamo Item Store ==
/// Item store backed by a DynamoDB table.
#[derive(Debug, Clone)]
pub struct DynamoItemStore {
    client: Client,
    table_name: String,
}

impl DynamoItemStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Builds a client from the environment for the given region.
    pub async fn from_env(region: impl Into<String>, table_name: impl Into<String>) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.into()))
            .load()
            .await;
        Self::new(Client::new(&config), table_name)
    }
}

#[async_trait]
impl ItemStore for DynamoItemStore {
    async fn scan(&self, request: ScanRequest) -> StoreResult<Page> {
        let expr = ScanExpression::render(&request.filter, request.projection.as_deref());
        let limit = i32::try_from(request.limit).unwrap_or(i32::MAX);
        let start_key = request.start.as_ref().map(decode_token).transpose()?;

        let names: HashMap<String, String> = expr.attribute_names.into_iter().collect();
        let values: HashMap<String, AttributeValue> = expr
            .attribute_values
            .into_iter()
            .map(|(k, v)| (k, AttributeValue::S(v)))
            .collect();

        let output = self
            .client
            .scan()
            .table_name(&self.table_name)
            .set_filter_expression(expr.filter_expression)
            .set_projection_expression(expr.projection_expression)
            .set_expression_attribute_names((!names.is_empty()).then_some(names))
            .set_expression_attribute_values((!values.is_empty()).then_some(values))
            .limit(limit)
            .set_exclusive_start_key(start_key)
            .send()
            .await
            .map_err(classify_error)?;

        let items = decode_items(output.items());
        let next = output.last_evaluated_key().map(encode_token).transpose()?;

        debug!(
            "DynamoDB scan on {}: {} items, {} evaluated, more={}",
            self.table_name,
            items.len(),
            output.scanned_count(),
            next.is_some()
        );

        Ok(Page {
            items,
            next,
            scanned_count: output.scanned_count().max(0) as usize,
        })
    }
}

// == Error Classification ==
fn classify_error(err: SdkError<ScanError>) -> StoreError {
    let message = DisplayErrorContext(&err).to_string();
    match &err {
        SdkError::ServiceError(service) => classify_service_error(service.err(), message),
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) | SdkError::ResponseError(_) => {
            StoreError::Unavailable(message)
        }
        _ => StoreError::InvalidRequest(message),
    }
}

fn classify_service_error(err: &ScanError, message: String) -> StoreError {
    if err.is_provisioned_throughput_exceeded_exception()
        || err.is_request_limit_exceeded()
        || err.code() == Some("ThrottlingException")
    {
        StoreError::Throttled(message)
    } else if err.is_internal_server_error() {
        StoreError::Unavailable(message)
    } else {
        StoreError::InvalidRequest(message)
    }
}

// == Attribute Conversion ==
fn attribute_to_json(value: &AttributeValue) -> Value {
    match value {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => n
            .parse::<i64>()
            .map(Value::from)
            .ok()
            .or_else(|| n.parse::<f64>().ok().and_then(Number::from_f64).map(Value::Number))
            .unwrap_or_else(|| Value::String(n.clone())),
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::L(list) => Value::Array(list.iter().map(attribute_to_json).collect()),
        AttributeValue::M(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), attribute_to_json(v)))
                .collect(),
        ),
        AttributeValue::Ss(set) => Value::Array(set.iter().cloned().map(Value::String).collect()),
        AttributeValue::Ns(set) => Value::Array(
            set.iter()
                .map(|n| attribute_to_json(&AttributeValue::N(n.clone())))
                .collect(),
        ),
        _ => Value::Null,
    }
}

fn decode_item(record: &HashMap<String, AttributeValue>) -> StoreResult<Item> {
    let object: Map<String, Value> = record
        .iter()
        .map(|(k, v)| (k.clone(), attribute_to_json(v)))
        .collect();
    serde_json::from_value(Value::Object(object)).map_err(|e| StoreError::Decode(e.to_string()))
}

/// Decodes a page of records, dropping any whose typed attributes have the
/// wrong shape (a numeric `title`, say). Dropped records still count toward
/// the page's `scanned_count`.
fn decode_items(records: &[HashMap<String, AttributeValue>]) -> Vec<Item> {
    records
        .iter()
        .filter_map(|record| match decode_item(record) {
            Ok(item) => Some(item),
            Err(e) => {
                let url = match record.get(crate::store::item::URL) {
                    Some(AttributeValue::S(url)) => url.as_str(),
                    _ => "<no url>",
                };
                warn!("Skipping undecodable record {}: {}", url, e);
                None
            }
        })
        .collect()
}

// == Continuation Tokens ==
// Keys are stored as {"name": {"S": "..."}} or {"name": {"N": "..."}}.
fn encode_token(key: &HashMap<String, AttributeValue>) -> StoreResult<ContinuationToken> {
    let mut object = Map::new();
    for (name, value) in key {
        let tagged = match value {
            AttributeValue::S(s) => serde_json::json!({ "S": s }),
            AttributeValue::N(n) => serde_json::json!({ "N": n }),
            _ => {
                return Err(StoreError::Decode(format!(
                    "unsupported key attribute type for '{}'",
                    name
                )))
            }
        };
        object.insert(name.clone(), tagged);
    }
    Ok(ContinuationToken::new(Value::Object(object).to_string()))
}

fn decode_token(token: &ContinuationToken) -> StoreResult<HashMap<String, AttributeValue>> {
    let invalid = || StoreError::InvalidRequest(format!("malformed continuation token '{}'", token));

    let parsed: Map<String, Value> = serde_json::from_str(token.as_str()).map_err(|_| invalid())?;
    parsed
        .into_iter()
        .map(|(name, tagged)| {
            let value = match (tagged.get("S"), tagged.get("N")) {
                (Some(Value::String(s)), _) => AttributeValue::S(s.clone()),
                (_, Some(Value::String(n))) => AttributeValue::N(n.clone()),
                _ => return Err(invalid()),
            };
            Ok((name, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::error::ErrorMetadata;
    use aws_sdk_dynamodb::types::error::{
        InternalServerError, ProvisionedThroughputExceededException, RequestLimitExceeded,
        ResourceNotFoundException,
    };

    fn record(pairs: &[(&str, AttributeValue)]) -> HashMap<String, AttributeValue> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_token_round_trip() {
        let mut key = HashMap::new();
        key.insert("url".to_string(), AttributeValue::S("https://a".into()));
        key.insert("rank".to_string(), AttributeValue::N("7".into()));

        let token = encode_token(&key).unwrap();
        assert_eq!(decode_token(&token).unwrap(), key);
    }

    #[test]
    fn test_malformed_token() {
        let result = decode_token(&ContinuationToken::new("{not json"));
        assert!(matches!(result, Err(StoreError::InvalidRequest(_))));
    }

    #[test]
    fn test_decode_item_from_attributes() {
        let mut record = HashMap::new();
        record.insert("url".to_string(), AttributeValue::S("https://a".into()));
        record.insert("bfCategory".to_string(), AttributeValue::S("tech".into()));
        record.insert(
            "bfTags".to_string(),
            AttributeValue::L(vec![AttributeValue::S("rust".into())]),
        );
        record.insert("status".to_string(), AttributeValue::S("active".into()));
        record.insert("views".to_string(), AttributeValue::N("42".into()));

        let item = decode_item(&record).unwrap();
        assert_eq!(item.category.as_deref(), Some("tech"));
        assert_eq!(item.tags, Some(vec!["rust".to_string()]));
        assert!(item.is_active());
        assert_eq!(item.extra["views"], 42);
    }

    #[test]
    fn test_off_type_record_is_skipped() {
        let good = record(&[
            ("url", AttributeValue::S("https://a".into())),
            ("title", AttributeValue::S("Rust".into())),
        ]);
        let bad = record(&[
            ("url", AttributeValue::S("https://b".into())),
            ("title", AttributeValue::N("7".into())),
        ]);

        assert!(matches!(decode_item(&bad), Err(StoreError::Decode(_))));

        let items = decode_items(&[good, bad]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].url, "https://a");
    }

    #[test]
    fn test_classify_throttling() {
        let throughput = ScanError::ProvisionedThroughputExceededException(
            ProvisionedThroughputExceededException::builder()
                .message("slow down")
                .build(),
        );
        let request_limit =
            ScanError::RequestLimitExceeded(RequestLimitExceeded::builder().message("quota").build());
        let generic = ScanError::generic(ErrorMetadata::builder().code("ThrottlingException").build());

        for err in [throughput, request_limit, generic] {
            assert!(matches!(
                classify_service_error(&err, "m".into()),
                StoreError::Throttled(_)
            ));
        }
    }

    #[test]
    fn test_classify_unavailable() {
        let internal = ScanError::InternalServerError(
            InternalServerError::builder().message("boom").build(),
        );
        assert!(matches!(
            classify_service_error(&internal, "m".into()),
            StoreError::Unavailable(_)
        ));

        let timeout = SdkError::<ScanError>::timeout_error("timed out");
        assert!(matches!(classify_error(timeout), StoreError::Unavailable(_)));
    }

    #[test]
    fn test_classify_invalid_request() {
        let missing = ScanError::ResourceNotFoundException(
            ResourceNotFoundException::builder().message("no table").build(),
        );
        let result = classify_service_error(&missing, "m".into());
        assert!(matches!(result, StoreError::InvalidRequest(_)));
        assert!(!result.is_retryable());

        let construction = SdkError::<ScanError>::construction_failure("bad builder");
        assert!(matches!(classify_error(construction), StoreError::InvalidRequest(_)));
    }
}
