//! Populate a database with sample portfolio data and an admin account.
//!
//! Clears gallery items, blog posts and testimonials, inserts the samples,
//! then creates the admin named by `SEED_ADMIN_EMAIL` / `SEED_ADMIN_PASSWORD`
//! unless an account with that email already exists.

use anyhow::{bail, Context};
use folio_core::gallery::GalleryCategory;
use folio_core::media::MediaRef;
use folio_core::roles::Role;
use folio_core::slug::slugify;
use folio_core::upsert::ResolvedMedia;
use folio_db::models::blog::CreateBlogPost;
use folio_db::models::gallery::CreateGalleryItem;
use folio_db::models::testimonial::{CreateTestimonial, UpdateTestimonial};
use folio_db::models::user::CreateUser;
use folio_db::repositories::{BlogRepo, GalleryRepo, TestimonialRepo, UserRepo};
use folio_db::DbPool;

use folio_api::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};

const GALLERY: &[(&str, &str, GalleryCategory, &str)] = &[
    (
        "Modern Brand Identity",
        "Complete brand identity design for a tech startup including logo, color palette, and brand guidelines.",
        GalleryCategory::Branding,
        "https://images.unsplash.com/photo-1626785774573-4b799315345d?w=800",
    ),
    (
        "Mobile App UI Design",
        "Clean and intuitive mobile app interface design for a fitness tracking application.",
        GalleryCategory::UiUx,
        "https://images.unsplash.com/photo-1512941937669-90a1b58e7e9c?w=800",
    ),
    (
        "Music Festival Poster",
        "Vibrant poster design for an annual summer music festival featuring bold typography and dynamic composition.",
        GalleryCategory::Posters,
        "https://images.unsplash.com/photo-1611162617213-7d7a39e9b1d7?w=800",
    ),
    (
        "Social Media Campaign",
        "Cohesive social media graphics for a product launch campaign across Instagram, Facebook, and Twitter.",
        GalleryCategory::SocialMedia,
        "https://images.unsplash.com/photo-1611162616305-c69b3fa7fbe0?w=800",
    ),
    (
        "Product Animation",
        "3D product animation showcasing features and benefits with smooth transitions and dynamic camera movements.",
        GalleryCategory::Motion,
        "https://images.unsplash.com/photo-1626785774625-ddcddc3445e9?w=800",
    ),
    (
        "E-commerce Website",
        "Modern e-commerce website design with focus on user experience and conversion optimization.",
        GalleryCategory::UiUx,
        "https://images.unsplash.com/photo-1460925895917-afdab827c52f?w=800",
    ),
];

/// (title, excerpt, category, featured, image)
const BLOG: &[(&str, &str, &str, bool, &str)] = &[
    (
        "The Power of Minimalism in Modern Design",
        "Discover how minimalist design principles can help you create more impactful and user-friendly designs.",
        "Design Theory",
        true,
        "https://images.unsplash.com/photo-1545235617-9465d2a55698?w=800",
    ),
    (
        "Color Psychology in Branding",
        "Learn how to use color psychology to create more effective and emotionally resonant brand identities.",
        "Branding",
        false,
        "https://images.unsplash.com/photo-1558591710-4b4a1ae0f04d?w=800",
    ),
    (
        "10 UI/UX Trends to Watch in 2024",
        "Stay ahead of the curve with these emerging UI/UX design trends that are shaping the industry.",
        "UI/UX",
        false,
        "https://images.unsplash.com/photo-1561070791-2526d30994b5?w=800",
    ),
];

/// (name, role, company, message)
const TESTIMONIALS: &[(&str, &str, &str, &str)] = &[
    (
        "John Doe",
        "CEO",
        "TechCorp",
        "Anand is an exceptional designer who truly understands user experience. His work transformed our product.",
    ),
    (
        "Jane Smith",
        "Marketing Director",
        "Creative Studio",
        "The branding package Anand created for us was exactly what we needed. Highly recommended!",
    ),
    (
        "Mike Johnson",
        "Founder",
        "StartupX",
        "Professional, creative, and timely. Working with AK Design was a pleasure.",
    ),
];

fn sample_media(url: &str, n: usize) -> ResolvedMedia {
    ResolvedMedia {
        primary: Some(MediaRef {
            url: url.to_string(),
            media_id: format!("sample_{n}"),
        }),
        collection: Vec::new(),
    }
}

async fn clear_samples(pool: &DbPool) -> anyhow::Result<()> {
    let mut tx = pool.begin().await?;
    for table in ["gallery_items", "blog_posts", "testimonials"] {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(&mut *tx)
            .await
            .with_context(|| format!("clearing {table}"))?;
    }
    tx.commit().await?;
    Ok(())
}

async fn seed_content(pool: &DbPool) -> anyhow::Result<()> {
    for (n, (title, description, category, image)) in GALLERY.iter().enumerate() {
        let draft = CreateGalleryItem {
            title: title.to_string(),
            description: description.to_string(),
            category: *category,
            about_project: String::new(),
            project_date: String::new(),
            client: String::new(),
        };
        GalleryRepo::create(pool, &draft, &sample_media(image, n + 1)).await?;
    }
    tracing::info!(count = GALLERY.len(), "Gallery items seeded");

    for (n, (title, excerpt, category, featured, image)) in BLOG.iter().enumerate() {
        let draft = CreateBlogPost {
            title: title.to_string(),
            slug: slugify(title),
            content: format!("{excerpt}\n\nThis sample post was created by the seed script."),
            excerpt: excerpt.to_string(),
            category: category.to_string(),
            featured: *featured,
        };
        BlogRepo::create(pool, &draft, &sample_media(image, 100 + n)).await?;
    }
    tracing::info!(count = BLOG.len(), "Blog posts seeded");

    let approve = UpdateTestimonial {
        approved: Some(true),
        ..Default::default()
    };
    for (name, role, company, message) in TESTIMONIALS {
        let draft = CreateTestimonial {
            name: name.to_string(),
            role: role.to_string(),
            company: Some(company.to_string()),
            message: message.to_string(),
        };
        let created = TestimonialRepo::create(pool, &draft, &ResolvedMedia::default()).await?;
        TestimonialRepo::update(pool, created.id, &approve, &ResolvedMedia::default()).await?;
    }
    tracing::info!(count = TESTIMONIALS.len(), "Testimonials seeded (approved)");

    Ok(())
}

async fn seed_admin(pool: &DbPool) -> anyhow::Result<()> {
    let email = std::env::var("SEED_ADMIN_EMAIL").context("SEED_ADMIN_EMAIL must be set")?;
    let password =
        std::env::var("SEED_ADMIN_PASSWORD").context("SEED_ADMIN_PASSWORD must be set")?;
    if let Err(msg) = validate_password_strength(&password, MIN_PASSWORD_LENGTH) {
        bail!("SEED_ADMIN_PASSWORD rejected: {msg}");
    }

    if UserRepo::find_by_email(pool, &email).await?.is_some() {
        tracing::info!(%email, "Admin account already exists, leaving it unchanged");
        return Ok(());
    }

    let password_hash =
        hash_password(&password).map_err(|e| anyhow::anyhow!("hashing admin password: {e}"))?;
    let name = std::env::var("SEED_ADMIN_NAME").unwrap_or_else(|_| "Admin".into());
    let admin = UserRepo::create(
        pool,
        &CreateUser {
            name,
            email,
            password_hash,
            role: Role::Admin,
        },
    )
    .await?;
    tracing::info!(user_id = admin.id, email = %admin.email, "Admin account created");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio_seed=info,info".into()),
        )
        .init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = folio_db::create_pool(&database_url)
        .await
        .context("connecting to database")?;
    folio_db::run_migrations(&pool)
        .await
        .context("running migrations")?;

    clear_samples(&pool).await?;
    seed_content(&pool).await?;
    seed_admin(&pool).await?;

    tracing::info!("Seed complete");
    Ok(())
}
