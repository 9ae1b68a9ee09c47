pub mod cnpj;
pub mod health;
