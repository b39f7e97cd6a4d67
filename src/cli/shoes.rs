//! Interactive shoe menu: add / view / edit / search / delete, all
//! scoped to the logged-in user.

use sqlx::PgPool;

use crate::auth::service as auth_service;
use crate::cli::prompt::{
    prompt_float, prompt_optional_float, prompt_optional_string, prompt_string, read_line,
};
use crate::cli::report_error;
use crate::error::AppError;
use crate::shoes::repo::{self, NewShoe, Shoe, ShoeFilter, ShoeUpdate};
use crate::shoes::service;
use crate::validation::{CONDITION_MAX, IMAGE_MAX, PRICE_MAX, SIZE_MAX, TEXT_FIELD_MAX};

fn describe(shoe: &Shoe) -> String {
    let image = shoe.image.as_deref().unwrap_or("No image available");
    format!(
        "{}, {}, {}, size {}, ${:.2}, {}, {}",
        shoe.brand, shoe.model, shoe.colorway, shoe.size, shoe.price, image, shoe.condition
    )
}

fn pair_word(qty: i64) -> &'static str {
    if qty == 1 {
        "Pair"
    } else {
        "Pairs"
    }
}

pub async fn shoe_menu(db: &PgPool, user_id: i32) -> anyhow::Result<()> {
    loop {
        println!("\nWelcome to the Shoe Menu");
        println!("1. Add a shoe");
        println!("2. View all shoes");
        println!("3. View a specific shoe");
        println!("4. Edit a shoe");
        println!("5. Search shoes");
        println!("6. Delete a shoe");
        println!("7. Delete my account");
        println!("8. Exit");

        match read_line("Enter your choice: ")?.as_str() {
            "1" => add_shoe(db, user_id).await?,
            "2" => view_all(db, user_id).await?,
            "3" => {
                if let Some(shoe) = select_shoe(db, user_id).await? {
                    println!("\nShoe Details: {}", describe(&shoe));
                }
            }
            "4" => edit_shoe(db, user_id).await?,
            "5" => search_shoes(db, user_id).await?,
            "6" => delete_shoe(db, user_id).await?,
            "7" => {
                if delete_account(db, user_id).await? {
                    return Ok(());
                }
            }
            "8" => {
                println!("Exiting Shoe Menu...");
                return Ok(());
            }
            _ => println!("\nError: Invalid choice, please try again"),
        }
    }
}

async fn add_shoe(db: &PgPool, user_id: i32) -> anyhow::Result<()> {
    println!("Adding a new shoe to your collection");

    let shoe = NewShoe {
        brand: prompt_string("Enter the brand of your shoe: ", TEXT_FIELD_MAX)?,
        model: prompt_string("Enter the model of your shoe: ", TEXT_FIELD_MAX)?,
        colorway: prompt_string("Enter the colorway of your shoe: ", TEXT_FIELD_MAX)?,
        size: prompt_float("Enter the size of your shoe: ", 1.0, SIZE_MAX)?,
        price: prompt_float("Enter the price of your shoe: ", 0.01, PRICE_MAX)?,
        image: prompt_optional_string(
            "Enter the image filename of your shoe (optional): ",
            IMAGE_MAX,
        )?,
        condition: prompt_string(
            "Enter the condition of your shoe (New, Used, Damaged, etc.): ",
            CONDITION_MAX,
        )?,
    };

    match service::add(db, user_id, shoe).await {
        Ok(_) => println!("Shoe added to your collection!"),
        Err(e) => report_error(&e),
    }
    Ok(())
}

async fn view_all(db: &PgPool, user_id: i32) -> anyhow::Result<()> {
    println!("Grabbing all of your shoes from the database...");
    match service::list_grouped(db, user_id).await {
        Ok(grouped) if grouped.is_empty() => println!("No shoes found in your collection"),
        Ok(grouped) => {
            for ((brand, model), shoes) in &grouped {
                println!(
                    "\n{brand} {model} — {} {}",
                    shoes.len(),
                    pair_word(shoes.len() as i64)
                );
                for shoe in shoes {
                    println!("  {}", describe(shoe));
                }
            }
            println!();
        }
        Err(e) => report_error(&e),
    }
    Ok(())
}

/// Drill-down selection: brand, then model, then variant. Mirrors the
/// browse flow the composite index was built for.
async fn select_shoe(db: &PgPool, user_id: i32) -> anyhow::Result<Option<Shoe>> {
    let brands = match repo::brand_counts(db, user_id).await {
        Ok(b) => b,
        Err(e) => {
            report_error(&AppError::Database(e));
            return Ok(None);
        }
    };
    if brands.is_empty() {
        println!("No shoes found in your collection");
        return Ok(None);
    }

    let (brand, models) = loop {
        println!("\nHere are the brands of your shoes:");
        for b in &brands {
            println!("{}, {} {} of Shoes", b.brand, b.quantity, pair_word(b.quantity));
        }
        let choice = read_line("\nSelect a brand: ")?;
        match repo::model_counts(db, user_id, &choice).await {
            Ok(models) if !models.is_empty() => break (choice, models),
            Ok(_) => println!("\nError: Please select a valid brand"),
            Err(e) => {
                report_error(&AppError::Database(e));
                return Ok(None);
            }
        }
    };

    let (model, variants) = loop {
        println!("\nHere are the models of your shoes:");
        for m in &models {
            println!("{}, {} {} of Shoes", m.model, m.quantity, pair_word(m.quantity));
        }
        let choice = read_line("\nSelect a model: ")?;
        match repo::variant_counts(db, user_id, &brand, &choice).await {
            Ok(variants) if !variants.is_empty() => break (choice, variants),
            Ok(_) => println!("\nError: Please select a valid model"),
            Err(e) => {
                report_error(&AppError::Database(e));
                return Ok(None);
            }
        }
    };

    let variant = loop {
        println!("\nHere are the variants of your shoes:");
        for (i, v) in variants.iter().enumerate() {
            println!(
                "{}. {}, {}, {}, {}, {} {} of Shoes",
                i + 1,
                model,
                v.colorway,
                v.size,
                v.condition,
                v.quantity,
                pair_word(v.quantity)
            );
        }
        let choice = read_line("\nSelect a variant: ")?;
        match choice.parse::<usize>() {
            Ok(n) if n >= 1 && n <= variants.len() => break &variants[n - 1],
            _ => println!("\nError: Please select a valid variant"),
        }
    };

    match repo::find_variant(
        db,
        user_id,
        &brand,
        &model,
        &variant.colorway,
        variant.size,
        &variant.condition,
    )
    .await
    {
        Ok(Some(shoe)) => Ok(Some(shoe)),
        Ok(None) => {
            println!("No shoe found with the given criteria");
            Ok(None)
        }
        Err(e) => {
            report_error(&AppError::Database(e));
            Ok(None)
        }
    }
}

async fn edit_shoe(db: &PgPool, user_id: i32) -> anyhow::Result<()> {
    let Some(shoe) = select_shoe(db, user_id).await? else {
        return Ok(());
    };
    println!("\nEditing: {}", describe(&shoe));

    let changes = loop {
        println!("What would you like to edit?");
        println!("1. Brand\n2. Model\n3. Colorway\n4. Size\n5. Price\n6. Image\n7. Condition");

        let mut changes = ShoeUpdate::default();
        match read_line("Enter your choice: ")?.as_str() {
            "1" => changes.brand = Some(prompt_string("Enter the new brand name: ", TEXT_FIELD_MAX)?),
            "2" => changes.model = Some(prompt_string("Enter the new model name: ", TEXT_FIELD_MAX)?),
            "3" => {
                changes.colorway = Some(prompt_string("Enter the new colorway: ", TEXT_FIELD_MAX)?)
            }
            "4" => changes.size = Some(prompt_float("Enter the new size: ", 1.0, SIZE_MAX)?),
            "5" => changes.price = Some(prompt_float("Enter the new price: ", 0.01, PRICE_MAX)?),
            "6" => {
                // Empty input clears the stored image.
                changes.image =
                    Some(prompt_optional_string("Enter the new image filename: ", IMAGE_MAX)?)
            }
            "7" => {
                changes.condition = Some(prompt_string(
                    "Enter the updated condition (New, Used, Damaged, etc.): ",
                    CONDITION_MAX,
                )?)
            }
            _ => {
                println!("\nError: Invalid choice, please try again");
                continue;
            }
        }
        break changes;
    };

    match service::update(db, user_id, shoe.id, changes).await {
        Ok(updated) => println!("Shoe updated: {}", describe(&updated)),
        Err(e) => report_error(&e),
    }
    Ok(())
}

async fn search_shoes(db: &PgPool, user_id: i32) -> anyhow::Result<()> {
    println!("Search your collection (leave a field empty to skip it)");

    let filter = ShoeFilter {
        brand: prompt_optional_string("Brand contains: ", TEXT_FIELD_MAX)?,
        model: prompt_optional_string("Model contains: ", TEXT_FIELD_MAX)?,
        colorway: prompt_optional_string("Colorway contains: ", TEXT_FIELD_MAX)?,
        size: prompt_optional_float("Exact size: ", 0.01, SIZE_MAX)?,
        condition: prompt_optional_string("Condition contains: ", CONDITION_MAX)?,
    };

    match service::search(db, user_id, &filter).await {
        Ok(shoes) if shoes.is_empty() => println!("No shoes matched your search"),
        Ok(shoes) => {
            println!("\nFound {} result(s):", shoes.len());
            for shoe in &shoes {
                println!("  {}", describe(shoe));
            }
        }
        Err(e) => report_error(&e),
    }
    Ok(())
}

async fn delete_shoe(db: &PgPool, user_id: i32) -> anyhow::Result<()> {
    let Some(shoe) = select_shoe(db, user_id).await? else {
        return Ok(());
    };
    println!("Deleting the shoe...");
    match service::delete(db, user_id, shoe.id).await {
        Ok(()) => println!("{} {} was deleted successfully", shoe.brand, shoe.model),
        Err(e) => report_error(&e),
    }
    Ok(())
}

/// Returns true when the account was deleted and the session is over.
async fn delete_account(db: &PgPool, user_id: i32) -> anyhow::Result<bool> {
    let confirm = read_line(
        "This will delete your account and every shoe in it. Type 'yes' to confirm: ",
    )?;
    if confirm != "yes" {
        println!("Account deletion cancelled");
        return Ok(false);
    }
    match auth_service::delete_account(db, user_id).await {
        Ok(()) => {
            println!("Your account has been deleted. Goodbye!");
            Ok(true)
        }
        Err(e) => {
            report_error(&e);
            Ok(false)
        }
    }
}
