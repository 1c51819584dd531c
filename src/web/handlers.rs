use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::{
    core::{Category, Item},
    inventory::{Inventory, SortMode, ViewState},
    web::{ApiResponse, AppState, WebError, WebResult},
};

#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub sort: SortMode,
}

#[derive(Debug, Deserialize)]
pub struct AmountQuery {
    pub amount: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub name: String,
    pub quantity: Option<u32>,
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub name: String,
    pub display_name: String,
    pub quantity: u32,
    pub category: Option<Category>,
    pub added_at: String,
}

impl From<&Item> for ItemView {
    fn from(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            display_name: item.display_name(),
            quantity: item.quantity,
            category: item.category.clone(),
            added_at: item.added_at_iso(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InventoryView {
    pub items: Vec<ItemView>,
    pub state: ViewState,
}

impl InventoryView {
    fn render(inventory: &Inventory, query: &ViewQuery) -> Self {
        Self {
            items: inventory
                .view(&query.search, query.sort)
                .into_iter()
                .map(ItemView::from)
                .collect(),
            state: inventory.state().clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiMessage {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct CategoriesView {
    pub categories: Vec<Category>,
    pub sort_modes: Vec<SortModeView>,
}

#[derive(Debug, Serialize)]
pub struct SortModeView {
    pub value: SortMode,
    pub label: &'static str,
}

type InventoryResponse = WebResult<Json<ApiResponse<InventoryView>>>;

pub async fn healthcheck() -> Json<ApiResponse<ApiMessage>> {
    Json(ApiResponse {
        data: ApiMessage {
            message: "ok".to_string(),
        },
    })
}

pub async fn list_items(
    State(state): State<AppState>,
    query: Result<Query<ViewQuery>, QueryRejection>,
) -> InventoryResponse {
    let Query(query) = query?;
    let inventory = state.inventory.lock().await;
    Ok(Json(ApiResponse {
        data: InventoryView::render(&inventory, &query),
    }))
}

pub async fn add_item(
    State(state): State<AppState>,
    query: Result<Query<ViewQuery>, QueryRejection>,
    payload: Result<Json<AddItemRequest>, JsonRejection>,
) -> InventoryResponse {
    let Query(query) = query?;
    let Json(payload) = payload?;
    let category = Category::parse_listed(payload.category.as_deref().unwrap_or_default())
        .map_err(WebError::validation)?;
    let mut inventory = state.inventory.lock().await;
    inventory
        .add_item(&payload.name, payload.quantity.unwrap_or(1), category)
        .await?;
    Ok(Json(ApiResponse {
        data: InventoryView::render(&inventory, &query),
    }))
}

pub async fn increment_one(
    State(state): State<AppState>,
    Path(name): Path<String>,
    query: Result<Query<ViewQuery>, QueryRejection>,
) -> InventoryResponse {
    let Query(query) = query?;
    let mut inventory = state.inventory.lock().await;
    inventory.increment_one(&name).await?;
    Ok(Json(ApiResponse {
        data: InventoryView::render(&inventory, &query),
    }))
}

pub async fn decrement_one(
    State(state): State<AppState>,
    Path(name): Path<String>,
    query: Result<Query<ViewQuery>, QueryRejection>,
) -> InventoryResponse {
    let Query(query) = query?;
    let mut inventory = state.inventory.lock().await;
    inventory.decrement_one(&name).await?;
    Ok(Json(ApiResponse {
        data: InventoryView::render(&inventory, &query),
    }))
}

pub async fn delete_quantity(
    State(state): State<AppState>,
    Path(name): Path<String>,
    amount: Result<Query<AmountQuery>, QueryRejection>,
    query: Result<Query<ViewQuery>, QueryRejection>,
) -> InventoryResponse {
    let Query(amount) = amount?;
    let Query(query) = query?;
    let mut inventory = state.inventory.lock().await;
    inventory
        .delete_quantity(&name, amount.amount.unwrap_or(1))
        .await?;
    Ok(Json(ApiResponse {
        data: InventoryView::render(&inventory, &query),
    }))
}

pub async fn list_categories() -> Json<ApiResponse<CategoriesView>> {
    Json(ApiResponse {
        data: CategoriesView {
            categories: Category::LISTED.to_vec(),
            sort_modes: SortMode::ALL
                .iter()
                .map(|mode| SortModeView {
                    value: *mode,
                    label: mode.label(),
                })
                .collect(),
        },
    })
}

pub async fn view_state(State(state): State<AppState>) -> Json<ApiResponse<ViewState>> {
    let inventory = state.inventory.lock().await;
    Json(ApiResponse {
        data: inventory.state().clone(),
    })
}

pub async fn clear_error(State(state): State<AppState>) -> StatusCode {
    state.inventory.lock().await.clear_error();
    StatusCode::NO_CONTENT
}
