use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use petstore::{AgeCategory, CollectionManager, Pet, PetForm, StoreConfig, filter};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "petstore")]
#[command(about = "Keep track of your pets from the command line")]
struct Cli {
    /// Directory holding the pet data (overrides PETSTORE_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Storage key the list is kept under (overrides PETSTORE_STORAGE_KEY)
    #[arg(long, global = true)]
    key: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a new pet
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        age: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        photo: Option<String>,
    },
    /// Change fields of an existing pet
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        age: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        photo: Option<String>,
    },
    /// Delete a pet
    Remove {
        id: String,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// List pets, optionally filtered
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "all")]
        category: AgeCategory,
    },
    /// Show one pet in full
    Show { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = StoreConfig::from_env();
    if let Some(data_dir) = cli.data_dir {
        config = config.data_dir(data_dir);
    }
    if let Some(key) = cli.key {
        config = config.storage_key(key);
    }

    let mut pets = CollectionManager::open(config.persistent_store()).await;
    run(&mut pets, cli.command)?;

    pets.flush()
        .await
        .with_context(|| format!("Failed to save pets to '{}'", config.data_dir.display()))?;
    pets.shutdown().await?;
    Ok(())
}

fn run(pets: &mut CollectionManager, command: Command) -> Result<()> {
    match command {
        Command::Add {
            name,
            age,
            description,
            photo,
        } => {
            let mut form = PetForm::new(name, age).description(description);
            form.photo = photo;
            let pet = form.submit(None).map_err(|errors| anyhow!("{}", errors))?;
            println!("Added {} ({})", pet.name, pet.id);
            pets.add(pet);
        }
        Command::Edit {
            id,
            name,
            age,
            description,
            photo,
        } => {
            let existing = pets
                .get(&id)
                .ok_or_else(|| anyhow!("No pet with id '{}'", id))?;
            let mut form = PetForm::from_pet(existing);
            if let Some(name) = name {
                form.name = name;
            }
            if let Some(age) = age {
                form.age = age;
            }
            if let Some(description) = description {
                form.description = description;
            }
            if let Some(photo) = photo {
                form.photo = Some(photo);
            }
            let pet = form
                .submit(Some(&id))
                .map_err(|errors| anyhow!("{}", errors))?;
            println!("Updated {} ({})", pet.name, pet.id);
            pets.update(pet);
        }
        Command::Remove { id, yes } => {
            let name = pets
                .get(&id)
                .map(|pet| pet.name.clone())
                .ok_or_else(|| anyhow!("No pet with id '{}'", id))?;
            if !yes {
                return Err(anyhow!(
                    "Refusing to delete '{}' without --yes",
                    name
                ));
            }
            pets.delete(&id);
            println!("Deleted {} ({})", name, id);
        }
        Command::List { search, category } => {
            let shown = filter(pets.list(), &search, category);
            if shown.is_empty() {
                println!("No pets found.");
            }
            for pet in &shown {
                println!("{}", summary_line(pet));
            }
        }
        Command::Show { id } => {
            let pet = pets
                .get(&id)
                .ok_or_else(|| anyhow!("No pet with id '{}'", id))?;
            println!("id:          {}", pet.id);
            println!("name:        {}", pet.name);
            println!("age:         {}", pet.age);
            println!("description: {}", pet.description.as_deref().unwrap_or("-"));
            println!("photo:       {}", pet.photo.as_deref().unwrap_or("-"));
        }
    }
    Ok(())
}

fn summary_line(pet: &Pet) -> String {
    match pet.description.as_deref() {
        Some(description) => format!("{}  {} (age {}) - {}", pet.id, pet.name, pet.age, description),
        None => format!("{}  {} (age {})", pet.id, pet.name, pet.age),
    }
}
