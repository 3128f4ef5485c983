use quote::quote;
use syn::parse_macro_input;
use syn::DeriveInput;
use syn::LitStr;

/// Turns a struct into a section of the parameter file. The argument
/// is the name of the section, e.g.
/// `#[balance_parameters("contributions")]`.
/// Missing fields are taken from the `Default` impl of the struct,
/// unknown fields are rejected.
#[proc_macro_attribute]
pub fn balance_parameters(
    args: proc_macro::TokenStream,
    input: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let section_name = parse_macro_input!(args as LitStr);
    let trait_impl: proc_macro2::TokenStream =
        parameters_trait_impl(input.clone(), section_name).into();
    let input: proc_macro2::TokenStream = input.into();
    let output = quote! {
        #[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
        #[serde(deny_unknown_fields)]
        #[serde(rename_all = "snake_case")]
        #[serde(default)]
        #input

        #trait_impl
    };
    output.into()
}

fn parameters_trait_impl(
    input: proc_macro::TokenStream,
    section_name: LitStr,
) -> proc_macro::TokenStream {
    let ast: DeriveInput = match syn::parse(input) {
        Ok(ast) => ast,
        Err(err) => return err.to_compile_error().into(),
    };
    let type_name = &ast.ident;
    let (impl_generics, type_generics, where_clause) = &ast.generics.split_for_impl();

    let gen = quote! {
        impl #impl_generics ::derive_traits::BalanceParameters for #type_name #type_generics #where_clause {
            fn section_name() -> &'static str {
                #section_name
            }
        }
    };
    gen.into()
}
