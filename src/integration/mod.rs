pub mod cloudinary_pelado;
pub mod sendgrid_pelado;
