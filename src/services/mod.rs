pub mod cnpj;
pub mod lookup;
pub mod registry;
