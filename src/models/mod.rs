// ============================================================================
// MODELS - MODULE PRINCIPAL
// ============================================================================
//
// Liste des modules:
//   - users : Utilisateurs (nom/username uniques, rôle et avatar en texte libre)
//   - task : Tâches (statut libre, assignee + créateur optionnels)
//   - dto : Requêtes entrantes et réponses de l'API
//   - health : Health check API
//
// Points d'attention:
//   - Tous les modèles utilisent SeaORM (pas de SQL brut)
//   - task référence users deux fois (assigned_to_id, created_by_id)
//   - users.created_at est une chaîne "Y-m-d H:i:s", pas un TIMESTAMP
//
// ============================================================================

pub mod users;
pub mod task;
pub mod dto;
pub mod health;
