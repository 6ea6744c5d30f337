use clap::{Parser, Subcommand};
use coursiva::cli::seeder::{SeedConfig, clear_seeded_data, seed_database};
use coursiva::cli::{create_teacher, promote};
use coursiva::modules::users::model::Role;
use dotenvy::dotenv;
use std::str::FromStr;

#[derive(Parser)]
#[command(name = "coursiva-cli")]
#[command(about = "Coursiva CLI - Administrative tools for Coursiva", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a teacher account
    CreateTeacher {
        /// Username for the new teacher
        #[arg(short = 'u', long)]
        username: String,

        /// Password for the new teacher
        #[arg(short = 'p', long)]
        password: String,
    },
    /// Change an existing user's role
    Promote {
        /// Username of the account to change
        #[arg(short = 'u', long)]
        username: String,

        /// New role: student or teacher
        #[arg(short = 'r', long)]
        role: String,
    },
    /// Seed the database with demo catalog content and accounts
    Seed {
        /// Number of categories to create
        #[arg(long, default_value = "3")]
        categories: usize,

        /// Number of modules per category
        #[arg(long, default_value = "2")]
        modules: usize,

        /// Number of courses per module
        #[arg(long, default_value = "2")]
        courses: usize,

        /// Number of chapters per course
        #[arg(long, default_value = "3")]
        chapters: usize,

        /// Number of lessons per chapter
        #[arg(long, default_value = "4")]
        lessons: usize,

        /// Number of student accounts
        #[arg(long, default_value = "10")]
        students: usize,
    },
    /// Clear seeded accounts and all catalog content
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    let cli = Cli::parse();

    match cli.command {
        Commands::CreateTeacher { username, password } => {
            match create_teacher(&pool, &username, &password).await {
                Ok(user) => {
                    println!("✅ Teacher account created");
                    println!("   Username: {}", user.username);
                }
                Err(e) => {
                    eprintln!("❌ Error creating teacher: {}", e.error);
                    std::process::exit(1);
                }
            }
        }
        Commands::Promote { username, role } => {
            let role = match Role::from_str(&role) {
                Ok(role) => role,
                Err(e) => {
                    eprintln!("❌ {}", e);
                    std::process::exit(1);
                }
            };

            match promote(&pool, &username, role).await {
                Ok(user) => {
                    println!("✅ Role updated");
                    println!("   Username: {}", user.username);
                    println!("   Role: {}", user.role.as_str());
                }
                Err(e) => {
                    eprintln!("❌ Error changing role: {}", e.error);
                    std::process::exit(1);
                }
            }
        }
        Commands::Seed {
            categories,
            modules,
            courses,
            chapters,
            lessons,
            students,
        } => {
            let config = SeedConfig {
                categories,
                modules_per_category: modules,
                courses_per_module: courses,
                chapters_per_course: chapters,
                lessons_per_chapter: lessons,
                students,
            };

            if let Err(e) = seed_database(&pool, config).await {
                eprintln!("❌ Seeding failed: {}", e.error);
                std::process::exit(1);
            }
        }
        Commands::ClearSeed => {
            if let Err(e) = clear_seeded_data(&pool).await {
                eprintln!("❌ Clearing failed: {}", e.error);
                std::process::exit(1);
            }
        }
    }
}
