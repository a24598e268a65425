//! Serviços de recursos da API
//!
//! Templates sem estado sobre o transporte: cada família de recursos expõe
//! seus endpoints com caminho e verbo fixos. Nenhuma lógica de decisão aqui -
//! opções de leitura e payloads de escrita passam direto para o transporte.

pub mod memberships;
pub mod projects;
pub mod tags;
pub mod tasks;
pub mod users;
pub mod workspaces;

pub use memberships::Memberships;
pub use projects::Projects;
pub use tags::Tags;
pub use tasks::Tasks;
pub use users::Users;
pub use workspaces::Workspaces;
