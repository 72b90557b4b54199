pub mod duplicata;

pub use duplicata::{
    boleto_filename, CreateDuplicataRequest, Duplicata, UpdateDuplicataRequest,
};
