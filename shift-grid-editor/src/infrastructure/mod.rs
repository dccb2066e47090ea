pub mod api_client;
pub mod dto;
pub mod pdf_writer;
pub mod rasterizer;
pub mod transport;
