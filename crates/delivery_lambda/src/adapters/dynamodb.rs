use std::collections::HashMap;
use std::future::Future;

use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use delivery_core::contract::{
    DeliveryRecord, DELIVERY_ADDRESS_FIELD, DELIVERY_ID_FIELD, RECIPIENT_NAME_FIELD, STATUS_FIELD,
};
use tracing::debug;

use crate::adapters::delivery_store::{DeliveryStore, StoreError};

pub type Item = HashMap<String, AttributeValue>;

#[derive(Debug, Clone)]
pub struct DynamoDbDeliveryStore {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
}

impl DynamoDbDeliveryStore {
    pub fn new(client: aws_sdk_dynamodb::Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

impl DeliveryStore for DynamoDbDeliveryStore {
    fn put_record(&self, record: &DeliveryRecord) -> Result<(), StoreError> {
        let client = self.client.clone();
        let table_name = self.table_name.clone();
        let item = record_to_item(record);

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .put_item()
                    .table_name(table_name)
                    .set_item(Some(item))
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| {
                        StoreError::Unavailable(format!(
                            "failed to put delivery item: {}",
                            DisplayErrorContext(&error)
                        ))
                    })
            })
        })
    }

    fn scan_records(&self) -> Result<Vec<DeliveryRecord>, StoreError> {
        let client = self.client.clone();
        let table_name = self.table_name.clone();

        let items = tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(collect_scan_pages(|start_key| {
                let client = client.clone();
                let table_name = table_name.clone();
                async move {
                    let output = client
                        .scan()
                        .table_name(table_name)
                        .set_exclusive_start_key(start_key)
                        .send()
                        .await
                        .map_err(|error| {
                            StoreError::Unavailable(format!(
                                "failed to scan delivery table: {}",
                                DisplayErrorContext(&error)
                            ))
                        })?;

                    Ok::<_, StoreError>(ScanPage {
                        items: output.items().to_vec(),
                        last_evaluated_key: output.last_evaluated_key().cloned(),
                    })
                }
            }))
        })?;

        items.iter().map(item_to_record).collect()
    }
}

/// One `Scan` response page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanPage {
    pub items: Vec<Item>,
    pub last_evaluated_key: Option<Item>,
}

/// Drains a paginated scan, feeding each page's `LastEvaluatedKey` back as the
/// next exclusive start key. An absent or empty key ends the scan.
pub async fn collect_scan_pages<F, Fut>(mut fetch_page: F) -> Result<Vec<Item>, StoreError>
where
    F: FnMut(Option<Item>) -> Fut,
    Fut: Future<Output = Result<ScanPage, StoreError>>,
{
    let mut items: Vec<Item> = Vec::new();
    let mut start_key: Option<Item> = None;
    loop {
        let page = fetch_page(start_key.take()).await?;
        debug!(
            component = "dynamodb_store",
            event = "scan_page",
            page_items = page.items.len(),
            has_more = page.last_evaluated_key.is_some(),
        );
        items.extend(page.items);

        match page.last_evaluated_key {
            Some(key) if !key.is_empty() => start_key = Some(key),
            _ => break,
        }
    }
    Ok(items)
}

pub fn record_to_item(record: &DeliveryRecord) -> Item {
    HashMap::from([
        (
            DELIVERY_ID_FIELD.to_string(),
            AttributeValue::S(record.delivery_id.clone()),
        ),
        (
            RECIPIENT_NAME_FIELD.to_string(),
            AttributeValue::S(record.recipient_name.clone()),
        ),
        (
            DELIVERY_ADDRESS_FIELD.to_string(),
            AttributeValue::S(record.delivery_address.clone()),
        ),
        (
            STATUS_FIELD.to_string(),
            AttributeValue::S(record.status.clone()),
        ),
    ])
}

pub fn item_to_record(item: &Item) -> Result<DeliveryRecord, StoreError> {
    Ok(DeliveryRecord {
        delivery_id: string_attribute(item, DELIVERY_ID_FIELD)?,
        recipient_name: string_attribute(item, RECIPIENT_NAME_FIELD)?,
        delivery_address: string_attribute(item, DELIVERY_ADDRESS_FIELD)?,
        status: string_attribute(item, STATUS_FIELD)?,
    })
}

fn string_attribute(item: &Item, name: &str) -> Result<String, StoreError> {
    let value = item.get(name).ok_or_else(|| {
        StoreError::CorruptRecord(format!("delivery item is missing attribute '{name}'"))
    })?;

    value.as_s().cloned().map_err(|_| {
        StoreError::CorruptRecord(format!(
            "delivery item attribute '{name}' is not a string"
        ))
    })
}
