// Données de démonstration (SEED_DEMO_DATA=true), insérées seulement sur une base vide

use chrono::Duration;
use sea_orm::*;
use tracing::info;

use crate::models::{task, users};
use crate::repositories::UserRepository;
use crate::utils::{datetime, password};

struct DemoUser {
    name: &'static str,
    username: &'static str,
    email: &'static str,
    password: &'static str,
    role: &'static str,
    avatar: &'static str,
}

const DEMO_USERS: [DemoUser; 3] = [
    DemoUser {
        name: "Admin User",
        username: "admin",
        email: "admin@example.com",
        password: "admin123",
        role: "ROLE_ADMIN",
        avatar: "admin.png",
    },
    DemoUser {
        name: "John Doe",
        username: "johndoe",
        email: "john@example.com",
        password: "password123",
        role: users::DEFAULT_ROLE,
        avatar: "john.png",
    },
    DemoUser {
        name: "Jane Smith",
        username: "janesmith",
        email: "jane@example.com",
        password: "password123",
        role: users::DEFAULT_ROLE,
        avatar: "jane.png",
    },
];

/// Retourne le nombre d'utilisateurs insérés (0 si la base contient déjà des comptes)
pub async fn seed_demo_data(db: &DatabaseConnection, iterations: u32) -> Result<usize, DbErr> {
    if UserRepository::count(db).await? > 0 {
        info!("Users table not empty, skipping demo data");
        return Ok(0);
    }

    let txn = db.begin().await?;

    let mut ids = Vec::with_capacity(DEMO_USERS.len());
    for demo in &DEMO_USERS {
        let password_hash = password::hash_password(demo.password, iterations)
            .map_err(|e| DbErr::Custom(format!("Failed to hash demo password: {}", e)))?;

        let user = users::ActiveModel {
            name: Set(demo.name.to_string()),
            username: Set(demo.username.to_string()),
            email: Set(demo.email.to_string()),
            password_hash: Set(Some(password_hash)),
            role: Set(demo.role.to_string()),
            avatar: Set(demo.avatar.to_string()),
            created_at: Set(datetime::timestamp()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        ids.push(user.id);
    }

    let (admin, john, jane) = (ids[0], ids[1], ids[2]);
    let now = datetime::now();

    // (titre, description, jours avant échéance, statut, assignee)
    let demo_tasks = [
        ("Développer le frontend", "Créer l'interface utilisateur de l'application", 7, "à faire", john),
        ("Configurer l'API", "Mettre en place les routes et les contrôleurs", 3, "en cours", jane),
        ("Réunion de planification", "Préparer le prochain sprint avec l'équipe", 1, "à faire", admin),
    ];

    for (title, description, days, status, assignee) in demo_tasks {
        task::ActiveModel {
            title: Set(title.to_string()),
            description: Set(description.to_string()),
            due_date: Set(Some(now + Duration::days(days))),
            status: Set(status.to_string()),
            assigned_to_id: Set(Some(assignee)),
            created_by_id: Set(Some(admin)),
            created_at: Set(now),
            updated_at: Set(None),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;
    info!("🌱 Demo data inserted: {} users, {} tasks", ids.len(), demo_tasks.len());

    Ok(ids.len())
}
