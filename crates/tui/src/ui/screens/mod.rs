pub mod historico;
pub mod login;
pub mod medpix;
pub mod perfil;
pub mod pesquisa;
