mod helpers;

mod addresses;
mod carts;
mod orders;
mod payments;
