//! Form records mirroring the inputs of each management screen.
//!
//! Every field is the raw string an input holds; an untouched input is
//! `""`. Forms are posted as-is and the server decides what counts as
//! present, so the client never duplicates the required-field rules.

use std::fmt::Debug;

use bizdesk_db::models::{Client, Product, Purchase, Resource, Sale, Supplier};
use serde::Serialize;

/// A [`Resource`] that a screen can edit through a form.
pub trait FormModel: Resource {
    type Form: Serialize + Default + Clone + Debug + PartialEq + Send + Sync;

    /// Collections whose rows populate this form's selection inputs.
    const REFERENCES: &'static [&'static str] = &[];

    /// Copy the writable fields of a row into a form.
    fn to_form(&self) -> Self::Form;
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClientForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl FormModel for Client {
    type Form = ClientForm;

    fn to_form(&self) -> ClientForm {
        ClientForm {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: opt(&self.phone),
            address: opt(&self.address),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SupplierForm {
    pub name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl FormModel for Supplier {
    type Form = SupplierForm;

    fn to_form(&self) -> SupplierForm {
        SupplierForm {
            name: self.name.clone(),
            contact_person: opt(&self.contact_person),
            email: opt(&self.email),
            phone: opt(&self.phone),
            address: opt(&self.address),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock: String,
}

impl FormModel for Product {
    type Form = ProductForm;

    fn to_form(&self) -> ProductForm {
        ProductForm {
            name: self.name.clone(),
            description: opt(&self.description),
            price: self.price.to_string(),
            stock: self.stock.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PurchaseForm {
    pub supplier_id: String,
    pub product_id: String,
    pub quantity: String,
    pub total_price: String,
    pub purchase_date: String,
}

impl FormModel for Purchase {
    type Form = PurchaseForm;

    const REFERENCES: &'static [&'static str] = &[Supplier::COLLECTION, Product::COLLECTION];

    fn to_form(&self) -> PurchaseForm {
        PurchaseForm {
            supplier_id: self.supplier_id.to_string(),
            product_id: self.product_id.to_string(),
            quantity: self.quantity.to_string(),
            total_price: self.total_price.to_string(),
            // NaiveDate displays as YYYY-MM-DD, the date input's format.
            purchase_date: self.purchase_date.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SaleForm {
    pub client_id: String,
    pub product_id: String,
    pub quantity: String,
    pub total_price: String,
    pub sale_date: String,
}

impl FormModel for Sale {
    type Form = SaleForm;

    const REFERENCES: &'static [&'static str] = &[Client::COLLECTION, Product::COLLECTION];

    fn to_form(&self) -> SaleForm {
        SaleForm {
            client_id: self.client_id.to_string(),
            product_id: self.product_id.to_string(),
            quantity: self.quantity.to_string(),
            total_price: self.total_price.to_string(),
            sale_date: self.sale_date.to_string(),
        }
    }
}
