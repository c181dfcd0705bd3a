//! Menu catalog database operations

use std::collections::{HashMap, HashSet};

use shared::models::{MenuItem, MenuItemDraft, MenuItemIngredient};
use sqlx::{PgPool, Postgres, Transaction};

use super::BoxError;

/// Outcome of a menu write that references recipe ingredients
#[derive(Debug)]
pub enum MenuWriteOutcome {
    Done(MenuItem),
    NotFound,
    UnknownIngredient(i64),
}

#[derive(sqlx::FromRow)]
struct MenuItemRow {
    id: i64,
    name: String,
    description: String,
    price: f64,
    image: String,
}

impl MenuItemRow {
    fn into_item(self, ingredients: Vec<MenuItemIngredient>) -> MenuItem {
        MenuItem {
            id: self.id,
            name: self.name,
            description: self.description,
            price: self.price,
            image: self.image,
            ingredients,
        }
    }
}

pub async fn list_menu_items(pool: &PgPool) -> Result<Vec<MenuItem>, BoxError> {
    let rows: Vec<MenuItemRow> =
        sqlx::query_as("SELECT id, name, description, price, image FROM menu_items ORDER BY id")
            .fetch_all(pool)
            .await?;
    if rows.is_empty() {
        return Ok(vec![]);
    }

    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    let ingredient_rows: Vec<(i64, i64, f64)> = sqlx::query_as(
        "SELECT menu_id, ingredient_id, quantity FROM menu_item_ingredients \
         WHERE menu_id = ANY($1) ORDER BY ingredient_id",
    )
    .bind(&ids)
    .fetch_all(pool)
    .await?;

    let mut recipe_map: HashMap<i64, Vec<MenuItemIngredient>> = HashMap::new();
    for (menu_id, ingredient_id, quantity) in ingredient_rows {
        recipe_map
            .entry(menu_id)
            .or_default()
            .push(MenuItemIngredient {
                ingredient_id,
                quantity,
            });
    }

    Ok(rows
        .into_iter()
        .map(|r| {
            let recipe = recipe_map.remove(&r.id).unwrap_or_default();
            r.into_item(recipe)
        })
        .collect())
}

pub async fn get_menu_item(pool: &PgPool, id: i64) -> Result<Option<MenuItem>, BoxError> {
    let row: Option<MenuItemRow> =
        sqlx::query_as("SELECT id, name, description, price, image FROM menu_items WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    let Some(row) = row else {
        return Ok(None);
    };

    let ingredients: Vec<(i64, f64)> = sqlx::query_as(
        "SELECT ingredient_id, quantity FROM menu_item_ingredients \
         WHERE menu_id = $1 ORDER BY ingredient_id",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;
    let ingredients = ingredients
        .into_iter()
        .map(|(ingredient_id, quantity)| MenuItemIngredient {
            ingredient_id,
            quantity,
        })
        .collect();

    Ok(Some(row.into_item(ingredients)))
}

/// Verify every recipe ingredient exists in inventory; returns the first
/// unknown id (lowest first, deterministic).
async fn find_unknown_ingredient(
    tx: &mut Transaction<'_, Postgres>,
    recipe: &[MenuItemIngredient],
) -> Result<Option<i64>, BoxError> {
    if recipe.is_empty() {
        return Ok(None);
    }
    let mut wanted: Vec<i64> = recipe.iter().map(|i| i.ingredient_id).collect();
    wanted.sort_unstable();
    wanted.dedup();

    let known: Vec<i64> =
        sqlx::query_scalar("SELECT ingredient_id FROM inventory WHERE ingredient_id = ANY($1)")
            .bind(&wanted)
            .fetch_all(&mut **tx)
            .await?;
    let known: HashSet<i64> = known.into_iter().collect();

    Ok(wanted.into_iter().find(|id| !known.contains(id)))
}

async fn replace_recipe(
    tx: &mut Transaction<'_, Postgres>,
    menu_id: i64,
    recipe: &[MenuItemIngredient],
) -> Result<(), BoxError> {
    sqlx::query("DELETE FROM menu_item_ingredients WHERE menu_id = $1")
        .bind(menu_id)
        .execute(&mut **tx)
        .await?;
    if recipe.is_empty() {
        return Ok(());
    }

    let menu_ids: Vec<i64> = recipe.iter().map(|_| menu_id).collect();
    let ingredient_ids: Vec<i64> = recipe.iter().map(|i| i.ingredient_id).collect();
    let quantities: Vec<f64> = recipe.iter().map(|i| i.quantity).collect();
    sqlx::query(
        r#"
        INSERT INTO menu_item_ingredients (menu_id, ingredient_id, quantity)
        SELECT * FROM UNNEST($1::bigint[], $2::bigint[], $3::double precision[])
        "#,
    )
    .bind(&menu_ids)
    .bind(&ingredient_ids)
    .bind(&quantities)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn create_menu_item(
    pool: &PgPool,
    draft: &MenuItemDraft,
) -> Result<MenuWriteOutcome, BoxError> {
    let mut tx = pool.begin().await?;

    if let Some(id) = find_unknown_ingredient(&mut tx, &draft.ingredients).await? {
        return Ok(MenuWriteOutcome::UnknownIngredient(id));
    }

    let image = draft.image.as_deref().unwrap_or("");
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO menu_items (name, description, price, image) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(&draft.name)
    .bind(&draft.description)
    .bind(draft.price)
    .bind(image)
    .fetch_one(&mut *tx)
    .await?;

    replace_recipe(&mut tx, id, &draft.ingredients).await?;

    tx.commit().await?;

    Ok(MenuWriteOutcome::Done(MenuItem {
        id,
        name: draft.name.clone(),
        description: draft.description.clone(),
        price: draft.price,
        image: image.to_string(),
        ingredients: draft.ingredients.clone(),
    }))
}

pub async fn update_menu_item(
    pool: &PgPool,
    id: i64,
    draft: &MenuItemDraft,
) -> Result<MenuWriteOutcome, BoxError> {
    let mut tx = pool.begin().await?;

    let existing: Option<i64> =
        sqlx::query_scalar("SELECT id FROM menu_items WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
    if existing.is_none() {
        return Ok(MenuWriteOutcome::NotFound);
    }

    if let Some(unknown) = find_unknown_ingredient(&mut tx, &draft.ingredients).await? {
        return Ok(MenuWriteOutcome::UnknownIngredient(unknown));
    }

    let image = draft.image.as_deref().unwrap_or("");
    sqlx::query(
        "UPDATE menu_items SET name = $1, description = $2, price = $3, image = $4 WHERE id = $5",
    )
    .bind(&draft.name)
    .bind(&draft.description)
    .bind(draft.price)
    .bind(image)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    replace_recipe(&mut tx, id, &draft.ingredients).await?;

    tx.commit().await?;

    Ok(MenuWriteOutcome::Done(MenuItem {
        id,
        name: draft.name.clone(),
        description: draft.description.clone(),
        price: draft.price,
        image: image.to_string(),
        ingredients: draft.ingredients.clone(),
    }))
}

/// Delete a menu item; recipe rows go with it via the FK cascade.
pub async fn delete_menu_item(pool: &PgPool, id: i64) -> Result<bool, BoxError> {
    let rows = sqlx::query("DELETE FROM menu_items WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
