// src/services/core/widgets/widget_service.rs

use crate::services::core::infrastructure::{
    ItemKey, QueryRequest, TableConfig, TableStore,
};
use crate::types::{BaseWidgetRecord, FullWidget, UserContext, UserWidgetRecord};
use crate::utils::{TabError, TabResult};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Fetches a user's widgets, merging widget definitions with the user's
/// per-widget state.
pub struct WidgetService {
    store: Arc<dyn TableStore>,
    tables: TableConfig,
}

impl WidgetService {
    pub fn new(store: Arc<dyn TableStore>, tables: TableConfig) -> Self {
        Self { store, tables }
    }

    /// Fetch the widgets for a user. Each result carries the shared widget
    /// definition plus the user's own state for it, with the JSON-valued
    /// fields serialized to strings. Results are sorted by position.
    pub async fn get_user_widgets(
        &self,
        user_context: &UserContext,
        user_id: &str,
        enabled_only: bool,
    ) -> TabResult<Vec<FullWidget>> {
        if user_context.id != user_id {
            return Err(TabError::authorization_error(
                "Users may only view their own widgets",
            ));
        }

        let user_widget_items = self.store.query(self.build_user_widgets_query(user_id)).await?;

        let mut user_widgets = user_widget_items
            .into_iter()
            .map(parse_user_widget)
            .collect::<TabResult<Vec<UserWidgetRecord>>>()?;
        if enabled_only {
            user_widgets.retain(|w| w.enabled);
        }

        // No user widgets: skip the base-widget fetch entirely.
        if user_widgets.is_empty() {
            return Ok(Vec::new());
        }

        let keys = user_widgets
            .iter()
            .map(|w| ItemKey::hash(w.widget_id.clone()))
            .collect();
        let base_items = self.store.batch_get(&self.tables.widgets, keys).await?;

        let mut base_by_id: HashMap<String, BaseWidgetRecord> = HashMap::new();
        for item in base_items {
            let base = parse_base_widget(item)?;
            base_by_id.insert(base.id.clone(), base);
        }

        let mut merged = user_widgets
            .iter()
            .filter_map(|user_widget| {
                base_by_id
                    .get(&user_widget.widget_id)
                    .map(|base| merge_widget(user_widget, base))
            })
            .collect::<TabResult<Vec<FullWidget>>>()?;

        merged.sort_by_key(|w| w.position);
        Ok(merged)
    }

    fn build_user_widgets_query(&self, user_id: &str) -> QueryRequest {
        QueryRequest {
            table_name: self.tables.user_widgets.clone(),
            index_name: None,
            key_condition_expression: "(#userId = :userId)".to_string(),
            expression_attribute_names: BTreeMap::from([(
                "#userId".to_string(),
                "userId".to_string(),
            )]),
            expression_attribute_values: BTreeMap::from([(
                ":userId".to_string(),
                Value::String(user_id.to_string()),
            )]),
        }
    }
}

fn merge_widget(user_widget: &UserWidgetRecord, base: &BaseWidgetRecord) -> TabResult<FullWidget> {
    Ok(FullWidget {
        id: base.id.clone(),
        name: base.name.clone(),
        widget_type: base.widget_type.clone(),
        icon: base.icon.clone(),
        enabled: user_widget.enabled,
        visible: user_widget.visible,
        data: serialize_field(&user_widget.data)?,
        config: serialize_field(&user_widget.config)?,
        settings: serialize_field(&base.settings)?,
        position: base.position,
    })
}

fn serialize_field(value: &Value) -> TabResult<String> {
    serde_json::to_string(value)
        .map_err(|e| TabError::database_error(format!("Failed to serialize widget field: {}", e)))
}

fn parse_user_widget(item: Value) -> TabResult<UserWidgetRecord> {
    serde_json::from_value(item)
        .map_err(|e| TabError::database_error(format!("Malformed user widget item: {}", e)))
}

fn parse_base_widget(item: Value) -> TabResult<BaseWidgetRecord> {
    serde_json::from_value(item)
        .map_err(|e| TabError::database_error(format!("Malformed widget item: {}", e)))
}
