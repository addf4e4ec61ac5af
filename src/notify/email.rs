//! Booking confirmation email content.

use serde::{Deserialize, Serialize};

use crate::booking::Booking;
use crate::catalog::Location;
use crate::pricing::eligibility::month_day;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub text: String,
}

impl Email {
    pub fn booking_confirmation(booking: &Booking) -> Self {
        Self {
            to: booking.parent.parent_email.trim().to_string(),
            subject: format!("Summer Camp Booking Confirmation - {}", booking.plan_name),
            text: confirmation_text(booking),
        }
    }
}

fn confirmation_text(booking: &Booking) -> String {
    let access = match booking.access {
        Some(window) => format!(
            "{} days ({} to {})",
            window.days,
            long_date(window.start),
            long_date(window.end)
        ),
        None => format!("from {}", long_date(booking.start_date)),
    };

    let pricing = &booking.pricing;
    let mut text = format!(
        "Dear {parent},\n\
         \n\
         Thank you for booking the {plan} for {children}.\n\
         \n\
         Booking Details:\n\
         - Booking reference: {id}\n\
         - Plan: {plan}\n\
         - Location: {location}\n\
         - Access Period: {access}\n\
         - Children: {count}\n\
         - Subtotal: {currency} {subtotal}\n\
         - VAT: {currency} {tax}\n\
         - Total paid: {currency} {total}\n\
         \n",
        parent = booking.parent.parent_name.trim(),
        plan = booking.plan_name,
        children = booking.child_names(),
        id = booking.id,
        location = booking.location.display_name(),
        access = access,
        count = pricing.child_count(),
        currency = pricing.currency,
        subtotal = pricing.subtotal,
        tax = pricing.tax_amount,
        total = pricing.final_total,
    );

    text.push_str(match booking.location {
        Location::AbuDhabi => "Your booking includes access to both Kids Camp and Football Clinic.\n\n",
        Location::AlAin => "Your booking includes access to Kids Camp.\n\n",
    });

    text.push_str(
        "Kids Camp Schedule:\n\
         - Abu Dhabi: Monday to Friday, 8:30 AM - 2 PM\n\
         - Al Ain: Monday to Thursday, 8:30 AM - 2 PM\n\n",
    );

    if booking.location == Location::AbuDhabi {
        text.push_str(
            "Football Clinic Schedule (Abu Dhabi only):\n\
             - U17 & U18: 3:00 PM - 5:00 PM\n\
             - U6, U8 & U10: 5:00 PM - 6:15 PM\n\
             - U12 & U13: 6:15 PM - 7:40 PM\n\
             - U14 & U15: 7:30 PM - 9:00 PM\n\n",
        );
    }

    text.push_str(
        "Please ensure your child arrives 15 minutes before the scheduled time.\n\
         \n\
         If you have any questions, please don't hesitate to contact us.\n\
         \n\
         Best regards,\n\
         Summer Camp Team\n",
    );
    text
}

fn long_date(date: chrono::NaiveDate) -> String {
    format!("{}, {}", month_day(date), date.format("%Y"))
}
