// Requêtes SeaORM, une structure par entité
pub mod task_repository;
pub mod user_repository;

pub use task_repository::TaskRepository;
pub use user_repository::UserRepository;
